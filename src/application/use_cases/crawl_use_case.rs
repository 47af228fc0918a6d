// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::settings::Settings;
use crate::domain::services::report_service::CrawlReport;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{FetchError, PageFetcher};
use crate::utils::errors::WorkerError;
use crate::utils::url_utils;
use crate::workers::manager::WorkerManager;

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error("Failed to build fetch engine: {0}")]
    Engine(#[from] FetchError),
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// 抓取用例
///
/// 根据配置构造固定的URL列表，运行工作池，返回排序后的报告
pub struct CrawlUseCase<F: PageFetcher + ?Sized + 'static> {
    fetcher: Arc<F>,
    settings: Arc<Settings>,
}

impl CrawlUseCase<ReqwestEngine> {
    /// 使用基于reqwest的抓取引擎
    pub fn from_settings(settings: Arc<Settings>) -> Result<Self, CrawlUseCaseError> {
        let engine = ReqwestEngine::from_settings(&settings)?;
        Ok(Self::new(Arc::new(engine), settings))
    }
}

impl<F: PageFetcher + ?Sized + 'static> CrawlUseCase<F> {
    pub fn new(fetcher: Arc<F>, settings: Arc<Settings>) -> Self {
        Self { fetcher, settings }
    }

    /// 本次抓取的全部页面
    pub fn urls(&self) -> Vec<String> {
        url_utils::listing_urls(
            self.settings.origin(),
            self.settings.site.recent_pages,
            &self.settings.site.top_lists,
        )
    }

    pub async fn execute(&self) -> Result<CrawlReport, CrawlUseCaseError> {
        let urls = self.urls();
        info!(
            origin = self.settings.origin(),
            pages = urls.len(),
            fetcher = self.fetcher.name(),
            "Crawl requested"
        );

        let manager = WorkerManager::new(
            self.fetcher.clone(),
            self.settings.crawler.workers,
            self.settings.retry_policy(),
        )
        .with_result_queue_capacity(self.settings.crawler.result_queue_capacity);

        let report = manager.run(urls).await?;
        Ok(report)
    }
}

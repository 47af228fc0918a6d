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

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::settings::Settings;
use crate::domain::models::record::Record;
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{FetchError, PageFetcher};

/// 抓取引擎
///
/// 基于reqwest实现的列表页抓取引擎。所有工作器共享同一个客户端（连接池），
/// 每个请求都受固定超时限制。
pub struct ReqwestEngine {
    client: reqwest::Client,
    extractor: ExtractionService,
    require_success_status: bool,
}

impl ReqwestEngine {
    /// 创建抓取引擎
    ///
    /// # 参数
    ///
    /// * `extractor` - 记录提取服务
    /// * `timeout` - 单次请求超时
    /// * `user_agent` - User-Agent
    /// * `require_success_status` - 非 2xx 响应是否视为失败
    pub fn new(
        extractor: ExtractionService,
        timeout: Duration,
        user_agent: &str,
        require_success_status: bool,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            extractor,
            require_success_status,
        })
    }

    /// 根据配置创建抓取引擎
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let extractor = ExtractionService::new(settings.origin(), settings.crawler.min_seeds);
        Self::new(
            extractor,
            settings.fetch_timeout(),
            &settings.fetch.user_agent,
            settings.fetch.require_success_status,
        )
    }

    pub fn extractor(&self) -> &ExtractionService {
        &self.extractor
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 执行HTTP抓取并提取记录
    ///
    /// # 参数
    ///
    /// * `url` - 列表页URL
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Record>)` - 该页的记录批次
    /// * `Err(FetchError)` - 网络或解析失败
    #[instrument(skip(self), fields(engine = self.name()))]
    async fn fetch_and_parse(&self, url: &str) -> Result<Vec<Record>, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if self.require_success_status && !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let content = response.text().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Parse(e.to_string())
            } else {
                FetchError::Network(e)
            }
        })?;

        if content.trim().is_empty() {
            return Err(FetchError::Parse("empty response body".to_string()));
        }

        // The parsed document lives only inside extract_html and never crosses an await
        let records = self.extractor.extract_html(&content);

        debug!(
            status = status.as_u16(),
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page fetched"
        );

        Ok(records)
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;

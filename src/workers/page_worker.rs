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

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::models::record::{AbandonedPage, PageOutcome, WorkItem};
use crate::engines::traits::PageFetcher;
use crate::queue::work_queue::WorkQueue;
use crate::utils::retry_policy::RetryPolicy;

/// 工作项处理后的去向
#[derive(Debug, PartialEq, Eq)]
enum Disposition {
    /// 结果已交给聚合器
    Reported,
    /// 已重新入队
    Requeued,
    /// 队列或结果通道已关闭，工作器应退出
    Stop,
}

/// 页面工作器
///
/// 循环从工作队列取出URL，调用抓取器；成功则把记录批次发给聚合器，
/// 失败则把同一URL放回工作队列。重试次数耗尽时向聚合器报告放弃。
pub struct PageWorker<F: PageFetcher + ?Sized> {
    worker_id: usize,
    fetcher: Arc<F>,
    retry_policy: RetryPolicy,
}

impl<F: PageFetcher + ?Sized> PageWorker<F> {
    /// 创建新的页面工作器实例
    pub fn new(worker_id: usize, fetcher: Arc<F>, retry_policy: RetryPolicy) -> Self {
        Self {
            worker_id,
            fetcher,
            retry_policy,
        }
    }

    pub fn id(&self) -> usize {
        self.worker_id
    }

    /// 运行工作器，直到工作队列关闭
    pub async fn run(&self, queue: WorkQueue, results: mpsc::Sender<PageOutcome>) {
        debug!(worker_id = self.worker_id, "Page worker started");

        let mut processed = 0usize;
        while let Some(item) = queue.pop().await {
            match self.process(item, &queue, &results).await {
                Disposition::Reported => processed += 1,
                Disposition::Requeued => {}
                Disposition::Stop => break,
            }
        }

        debug!(
            worker_id = self.worker_id,
            processed, "Page worker stopped"
        );
    }

    #[instrument(skip(self, item, queue, results), fields(worker_id = self.worker_id, url = %item.url, attempt = item.attempt))]
    async fn process(
        &self,
        item: WorkItem,
        queue: &WorkQueue,
        results: &mpsc::Sender<PageOutcome>,
    ) -> Disposition {
        match self.fetcher.fetch_and_parse(&item.url).await {
            Ok(records) => {
                info!(records = records.len(), "Page completed");
                let outcome = PageOutcome::Completed {
                    url: item.url,
                    records,
                };
                Self::report(results, outcome).await
            }
            Err(e) => {
                if !self.retry_policy.should_retry(item.attempt) {
                    error!(error = %e, "Giving up on page");
                    let outcome = PageOutcome::Abandoned(AbandonedPage {
                        url: item.url,
                        attempts: item.attempt,
                        reason: e.to_string(),
                    });
                    return Self::report(results, outcome).await;
                }

                warn!(error = %e, timeout = e.is_timeout(), "Fetch failed, requeueing page");
                let backoff = self.retry_policy.calculate_backoff(item.attempt);
                if !backoff.is_zero() {
                    sleep(backoff).await;
                }

                let next = item.next_attempt();
                debug!(item = %next, "Requeueing");
                match queue.push(next).await {
                    Ok(()) => Disposition::Requeued,
                    Err(_) => Disposition::Stop,
                }
            }
        }
    }

    async fn report(results: &mpsc::Sender<PageOutcome>, outcome: PageOutcome) -> Disposition {
        match results.send(outcome).await {
            Ok(()) => Disposition::Reported,
            Err(_) => Disposition::Stop,
        }
    }
}

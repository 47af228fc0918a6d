// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::models::record::{PageOutcome, WorkItem};
use crate::domain::services::report_service::CrawlReport;
use crate::engines::traits::PageFetcher;
use crate::queue::work_queue::WorkQueue;
use crate::utils::errors::WorkerError;
use crate::utils::retry_policy::RetryPolicy;
use crate::workers::aggregator::{Aggregator, AggregatorState};
use crate::workers::page_worker::PageWorker;

/// 工作管理器
///
/// 为一次抓取创建两条队列，启动聚合器和固定数量的页面工作器，
/// 投递全部工作项，然后等待所有任务结束后返回报告。
pub struct WorkerManager<F: PageFetcher + ?Sized + 'static> {
    fetcher: Arc<F>,
    worker_count: usize,
    retry_policy: RetryPolicy,
    result_queue_capacity: usize,
}

impl<F: PageFetcher + ?Sized + 'static> WorkerManager<F> {
    pub fn new(fetcher: Arc<F>, worker_count: usize, retry_policy: RetryPolicy) -> Self {
        Self {
            fetcher,
            worker_count: worker_count.max(1),
            retry_policy,
            result_queue_capacity: 1,
        }
    }

    /// 设置结果队列容量
    pub fn with_result_queue_capacity(mut self, capacity: usize) -> Self {
        self.result_queue_capacity = capacity.max(1);
        self
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// 执行一次完整的抓取
    ///
    /// # 参数
    ///
    /// * `urls` - 固定的页面URL列表
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 所有页面都已处理（成功或放弃）
    /// * `Err(WorkerError)` - 任务异常退出，或计数未归零
    pub async fn run(&self, urls: Vec<String>) -> Result<CrawlReport, WorkerError> {
        let expected = urls.len();
        let queue = WorkQueue::new(expected);
        let (results_tx, results_rx) = mpsc::channel::<PageOutcome>(self.result_queue_capacity);

        info!(
            pages = expected,
            workers = self.worker_count,
            "Starting crawl"
        );

        let aggregator = tokio::spawn(Aggregator::new(expected).run(results_rx, queue.clone()));
        let workers = self.start_workers(&queue, &results_tx);
        // Only workers hold result senders from here on
        drop(results_tx);

        for url in urls {
            if queue.push(WorkItem::new(url)).await.is_err() {
                warn!("Work queue closed while seeding, stopping");
                break;
            }
        }

        let aggregator = aggregator.await?;
        for joined in join_all(workers).await {
            joined?;
        }
        info!("All workers joined");

        if aggregator.state() == AggregatorState::Collecting {
            return Err(WorkerError::Incomplete {
                outstanding: aggregator.outstanding(),
            });
        }

        Ok(aggregator.finish())
    }

    fn start_workers(
        &self,
        queue: &WorkQueue,
        results: &mpsc::Sender<PageOutcome>,
    ) -> Vec<JoinHandle<()>> {
        (0..self.worker_count)
            .map(|worker_id| {
                let worker =
                    PageWorker::new(worker_id, self.fetcher.clone(), self.retry_policy.clone());
                let queue = queue.clone();
                let results = results.clone();
                tokio::spawn(async move {
                    worker.run(queue, results).await;
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::models::record::{AbandonedPage, PageOutcome, Record};
use crate::domain::services::report_service::{sort_records, CrawlReport};
use crate::queue::work_queue::WorkQueue;

/// 聚合器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// 接收批次
    Collecting,
    /// 计数归零，队列已关闭，等待排序
    Draining,
    /// 报告已生成
    Done,
}

/// 结果聚合器
///
/// 结果队列的唯一消费者，也是累积缓冲区和未完成页面计数的唯一所有者。
/// 每收到一个页面结果，计数减一；计数归零时关闭工作队列和结果队列，
/// 然后排序并生成报告。
#[derive(Debug)]
pub struct Aggregator {
    outstanding: usize,
    records: Vec<Record>,
    abandoned: Vec<AbandonedPage>,
    pages_completed: usize,
    state: AggregatorState,
}

impl Aggregator {
    /// 创建聚合器
    ///
    /// # 参数
    ///
    /// * `expected_pages` - 工作项总数；为 0 时直接进入 Draining
    pub fn new(expected_pages: usize) -> Self {
        Self {
            outstanding: expected_pages,
            records: Vec::new(),
            abandoned: Vec::new(),
            pages_completed: 0,
            state: if expected_pages == 0 {
                AggregatorState::Draining
            } else {
                AggregatorState::Collecting
            },
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// 接收一个页面结果
    ///
    /// 只在 Collecting 状态下接受；计数归零时转入 Draining。
    /// 返回接收后的状态。
    pub fn accept(&mut self, outcome: PageOutcome) -> AggregatorState {
        if self.state != AggregatorState::Collecting {
            warn!(url = outcome.url(), "Result arrived after collection finished, ignoring");
            return self.state;
        }

        match outcome {
            PageOutcome::Completed { url, records } => {
                debug!(url = %url, batch = records.len(), "Batch received");
                self.records.extend(records);
                self.pages_completed += 1;
            }
            PageOutcome::Abandoned(page) => {
                warn!(url = %page.url, attempts = page.attempts, "Page abandoned");
                self.abandoned.push(page);
            }
        }

        self.outstanding -= 1;
        debug!(
            outstanding = self.outstanding,
            records = self.records.len(),
            "Aggregator progress"
        );

        if self.outstanding == 0 {
            self.state = AggregatorState::Draining;
        }
        self.state
    }

    /// 排序并生成报告，进入 Done 状态
    pub fn finish(mut self) -> CrawlReport {
        sort_records(&mut self.records);
        self.state = AggregatorState::Done;
        info!(
            records = self.records.len(),
            pages = self.pages_completed,
            abandoned = self.abandoned.len(),
            "Aggregation done"
        );

        CrawlReport {
            records: self.records,
            abandoned: self.abandoned,
            pages_completed: self.pages_completed,
        }
    }

    /// 运行聚合循环
    ///
    /// 计数归零后关闭工作队列并关闭结果通道（唯一的关闭点），让所有工作器退出。
    /// 如果所有工作器在计数归零前就退出了，结果通道提前关闭，
    /// 返回的聚合器仍处于 Collecting 状态，由调用方决定如何处理。
    pub async fn run(
        mut self,
        mut results: mpsc::Receiver<PageOutcome>,
        queue: WorkQueue,
    ) -> Self {
        info!(expected = self.outstanding, "Aggregator collecting");

        while self.state == AggregatorState::Collecting {
            match results.recv().await {
                Some(outcome) => {
                    self.accept(outcome);
                }
                None => {
                    warn!(
                        outstanding = self.outstanding,
                        "Result queue closed before all pages were accounted for"
                    );
                    break;
                }
            }
        }

        queue.close();
        results.close();
        info!("Aggregator draining, queues closed");

        self
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::domain::models::record::WorkItem;

/// 队列错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// 队列已关闭
    #[error("Queue closed")]
    Closed,
}

/// 工作队列
///
/// 多生产者多消费者队列：入口和失败重试都向其中推送，所有工作器共享同一个接收端。
/// 关闭通过一个取消令牌完成，只应由聚合器调用一次；关闭后所有阻塞在
/// `pop`/`push` 上的工作器都会立即返回。
///
/// 容量等于工作项总数。每个URL在任一时刻最多只在队列中出现一次或正在被处理，
/// 所以推送永远不会因为队列满而阻塞，重试也就不会和其他工作器互相等待。
#[derive(Clone)]
pub struct WorkQueue {
    sender: mpsc::Sender<WorkItem>,
    receiver: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    shutdown: CancellationToken,
}

impl WorkQueue {
    /// 创建工作队列
    ///
    /// # 参数
    ///
    /// * `capacity` - 队列容量，通常为工作项总数（至少为 1）
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            shutdown: CancellationToken::new(),
        }
    }

    /// 入队工作项
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 入队成功
    /// * `Err(QueueError::Closed)` - 队列已关闭
    pub async fn push(&self, item: WorkItem) -> Result<(), QueueError> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(QueueError::Closed),
            sent = self.sender.send(item) => sent.map_err(|_| QueueError::Closed),
        }
    }

    /// 出队工作项，队列为空时阻塞
    ///
    /// 队列关闭后返回 `None`
    pub async fn pop(&self) -> Option<WorkItem> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => None,
            item = async { self.receiver.lock().await.recv().await } => item,
        }
    }

    /// 关闭队列，重复调用无副作用
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

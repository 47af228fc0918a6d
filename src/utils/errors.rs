// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("任务汇合失败: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("抓取未完成: 仍有 {outstanding} 个页面未处理")]
    Incomplete { outstanding: usize },
}

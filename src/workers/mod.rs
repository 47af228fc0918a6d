// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供页面工作器、结果聚合器以及负责启动和汇合它们的管理器
pub mod aggregator;
pub mod manager;
pub mod page_worker;

pub use aggregator::{Aggregator, AggregatorState};
pub use manager::WorkerManager;
pub use page_worker::PageWorker;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供工作队列：多个工作器共享消费，失败的页面重新入队，
/// 由聚合器统一关闭
pub mod work_queue;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心数据结构：
/// - 列表记录（Record）：从列表页提取并过滤后的条目
/// - 工作项（WorkItem）：一个待抓取的列表页
/// - 页面结果（PageOutcome）：工作器交给聚合器的消息
pub mod record;

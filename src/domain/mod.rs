// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：记录、工作项和页面结果
/// - 服务（services）：记录提取、排序与表格渲染
///
/// 领域层不依赖网络或并发实现，
/// 只包含纯粹的业务规则。
pub mod models;
pub mod services;

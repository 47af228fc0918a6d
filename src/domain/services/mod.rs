// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：从列表页提取并过滤记录
/// - 报告服务（report_service）：记录的稳定排序与表格渲染
pub mod extraction_service;
pub mod report_service;

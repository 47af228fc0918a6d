// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含把配置、抓取引擎和工作池编排在一起的用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含记录模型、记录提取和报告渲染
pub mod domain;

/// 引擎模块
///
/// 实现列表页抓取引擎
pub mod engines;

/// 队列模块
///
/// 实现工作队列
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现页面工作器、聚合器和工作器管理
pub mod workers;

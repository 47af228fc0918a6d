// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 列表记录实体
///
/// 从列表页的一行中提取出的结构化数据。记录在构造后不可变，
/// 所有权沿着 提取器 -> 批次 -> 聚合器 的方向转移。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 分类，已折叠空白并去除首尾空白
    pub category: String,
    /// 做种数，只有达到热度阈值的行才会生成记录
    pub seeds: u64,
    /// 标题，可能为空
    pub title: String,
    /// 绝对URL
    pub url: String,
}

impl Record {
    pub fn new(
        category: impl Into<String>,
        seeds: u64,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            seeds,
            title: title.into(),
            url: url.into(),
        }
    }
}

/// 工作项
///
/// 一个待抓取的列表页。除URL外没有其他身份，重试时以相同URL重新入队，
/// 仅携带已尝试次数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// 页面URL
    pub url: String,
    /// 当前是第几次尝试（从1开始）
    pub attempt: u32,
}

impl WorkItem {
    /// 创建首次尝试的工作项
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempt: 1,
        }
    }

    /// 失败后重新入队时使用的下一次尝试
    pub fn next_attempt(&self) -> Self {
        Self {
            url: self.url.clone(),
            attempt: self.attempt.saturating_add(1),
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (attempt {})", self.url, self.attempt)
    }
}

/// 放弃的页面
///
/// 重试次数耗尽后仍未成功的页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbandonedPage {
    pub url: String,
    pub attempts: u32,
    /// 最后一次失败的原因
    pub reason: String,
}

/// 页面处理结果
///
/// 工作器发送给聚合器的消息。每个工作项最终恰好产生一个结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// 页面成功抓取并解析，附带该页的记录批次（可能为空）
    Completed { url: String, records: Vec<Record> },
    /// 重试次数耗尽
    Abandoned(AbandonedPage),
}

impl PageOutcome {
    pub fn url(&self) -> &str {
        match self {
            PageOutcome::Completed { url, .. } => url,
            PageOutcome::Abandoned(page) => &page.url,
        }
    }
}

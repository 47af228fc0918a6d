// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::domain::models::record::Record;
use crate::utils::url_utils;

/// 默认热度阈值
pub const DEFAULT_MIN_SEEDS: u64 = 100;

/// 列表行数固定为四个单元格：分类、名称、做种数、下载数
const CELLS_PER_ROW: usize = 4;

// html5ever always inserts <tbody>, the second alternative covers fragments
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table#searchResult > tbody > tr, table#searchResult > tr").unwrap()
});
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static CATEGORY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("center").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div > a").unwrap());

/// 提取服务
///
/// 负责从列表页 HTML 中提取结构化记录。
/// 提取是输入文档的纯函数：对同一文档重复提取得到相同的结果。
#[derive(Debug, Clone)]
pub struct ExtractionService {
    origin: String,
    min_seeds: u64,
}

impl ExtractionService {
    /// 创建提取服务
    ///
    /// # 参数
    ///
    /// * `origin` - 站点源，用于拼接相对链接
    /// * `min_seeds` - 热度阈值，低于该值的行被丢弃
    pub fn new(origin: impl Into<String>, min_seeds: u64) -> Self {
        Self {
            origin: origin.into(),
            min_seeds,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 解析 HTML 文本并提取记录
    ///
    /// 解析得到的文档在返回前释放
    pub fn extract_html(&self, html_content: &str) -> Vec<Record> {
        let document = Html::parse_document(html_content);
        self.extract(&document)
    }

    /// 从已解析的文档中提取记录
    ///
    /// 格式不符合的行（单元格数量不为四、做种数不是整数或低于阈值）被静默跳过，
    /// 不会导致整页失败。输出顺序与文档顺序一致。
    pub fn extract(&self, document: &Html) -> Vec<Record> {
        document
            .select(&ROW_SELECTOR)
            .filter_map(|row| self.extract_row(row))
            .collect()
    }

    fn extract_row(&self, row: ElementRef<'_>) -> Option<Record> {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
        if cells.len() != CELLS_PER_ROW {
            return None;
        }

        let seeds = parse_seeds(&element_text(cells[2]))?;
        if seeds < self.min_seeds {
            return None;
        }

        let category = cells[0]
            .select(&CATEGORY_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_else(|| element_text(cells[0]));

        let anchor = cells[1].select(&ANCHOR_SELECTOR).next();
        let title = anchor.map(element_text).unwrap_or_default();
        let href = anchor
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default();

        Some(Record {
            category: normalize_category(&category),
            seeds,
            title,
            url: url_utils::absolute_url(&self.origin, href),
        })
    }
}

/// 折叠所有连续空白为单个空格并去除首尾空白
pub fn normalize_category(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 解析做种数，非整数文本（例如占位符）返回 None
fn parse_seeds(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;

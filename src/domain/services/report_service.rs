// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::cmp::Ordering;

use unicode_width::UnicodeWidthStr;

use crate::domain::models::record::{AbandonedPage, Record};

/// 表头
pub const HEADERS: [&str; 3] = ["Category", "Seeds", "URL"];

/// 抓取报告
///
/// 聚合器完成后产出的最终结果，记录已按分类和做种数排序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// 排序后的全部记录
    pub records: Vec<Record>,
    /// 重试耗尽而放弃的页面
    pub abandoned: Vec<AbandonedPage>,
    /// 成功完成的页面数
    pub pages_completed: usize,
}

impl CrawlReport {
    pub fn is_complete(&self) -> bool {
        self.abandoned.is_empty()
    }

    /// 渲染报告中的记录表格
    pub fn render(&self) -> String {
        render_table(&self.records)
    }
}

/// 排序比较器：先按分类（字典序），再按做种数升序
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.seeds.cmp(&b.seeds))
}

/// 稳定排序，分类与做种数都相同的记录保持输入顺序
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(compare_records);
}

/// 将记录渲染为左对齐的三列表格
///
/// 纯格式化函数，不做过滤也不做聚合
pub fn render_table(records: &[Record]) -> String {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| [r.category.clone(), r.seeds.to_string(), r.url.clone()])
        .collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(display_width(cell));
        }
    }

    let separator = separator_line(&widths);
    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&format_row(&HEADERS, &widths));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    if !rows.is_empty() {
        out.push_str(&separator);
    }
    out
}

/// 终端显示宽度，全角字符占两列
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn separator_line(widths: &[usize; 3]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn format_row<S: AsRef<str>>(cells: &[S; 3], widths: &[usize; 3]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths.iter()) {
        let cell = cell.as_ref();
        let padding = width - display_width(cell);
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line.push('\n');
    line
}

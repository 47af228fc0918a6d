// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用站点源拼接相对链接
///
/// 直接字符串拼接：站点源加上链接路径。
/// 已经是绝对地址的链接原样返回。
pub fn absolute_url(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!("{}{}", origin, href)
}

/// 构造固定的列表页URL集合
///
/// 依次为 `recent_pages` 个最新列表页（`/recent/0` 起），然后是固定的排行榜路径。
/// 纯函数，结果顺序确定。
pub fn listing_urls(origin: &str, recent_pages: u32, top_lists: &[String]) -> Vec<String> {
    (0..recent_pages)
        .map(|page| format!("{}/recent/{}", origin, page))
        .chain(top_lists.iter().map(|path| absolute_url(origin, path)))
        .collect()
}

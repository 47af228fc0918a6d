// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use seedscan::config::settings::Settings;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 列表页中的一行
pub struct Row<'a> {
    pub category: &'a str,
    pub title: &'a str,
    pub href: &'a str,
    pub seeds: &'a str,
}

/// 渲染一个列表页
pub fn listing_page(rows: &[Row<'_>]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                r#"<tr>
  <td class="vertTh"><center><a href="/browse/200">{}</a></center></td>
  <td><div class="detName"><a href="{}" class="detLink">{}</a></div><font class="detDesc">Uploaded today</font></td>
  <td align="right">{}</td>
  <td align="right">7</td>
</tr>"#,
                row.category, row.href, row.title, row.seeds
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html><head><title>listing</title></head><body>
<table id="searchResult">
<thead id="tableHead"><tr class="header"><th>Type</th><th>Name</th><th>SE</th><th>LE</th></tr></thead>
{}
</table>
</body></html>"#,
        body
    )
}

/// 模拟站点
pub struct MockSite {
    pub server: MockServer,
}

impl MockSite {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn origin(&self) -> String {
        self.server.uri()
    }

    /// 页面始终返回给定HTML
    pub async fn serve(&self, page_path: &str, html: String) {
        self.serve_with_status(page_path, 200, html).await;
    }

    /// 页面以指定状态码返回给定HTML
    pub async fn serve_with_status(&self, page_path: &str, status: u16, html: String) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(status)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(html),
            )
            .mount(&self.server)
            .await;
    }

    /// 页面前 `times` 次返回给定状态码。需在 `serve` 之前调用
    pub async fn fail_first(&self, page_path: &str, status: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// 页面始终返回给定状态码
    pub async fn always_fail(&self, page_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// 生成指向该站点的配置
    pub fn settings(&self, recent_pages: u32, top_lists: &[&str], extra: &str) -> Settings {
        let top: Vec<String> = top_lists.iter().map(|p| format!("\"{}\"", p)).collect();
        let contents = format!(
            r#"
[site]
origin = "{}"
recent_pages = {}
top_lists = [{}]

[crawler]
workers = 4

[fetch]
timeout_secs = 5

{}
"#,
            self.origin(),
            recent_pages,
            top.join(", "),
            extra
        );

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        Settings::from_file(file.path()).unwrap()
    }
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::models::record::Record;

/// 抓取错误类型
///
/// 网络错误和解析错误走同一条恢复路径：由工作器重新入队
#[derive(Error, Debug)]
pub enum FetchError {
    /// 超时、连接失败或主机不可达
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// 非成功的HTTP状态码
    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),
    /// 响应体无法作为HTML解析
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    /// 是否属于网络类错误（包括状态码错误）
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Status(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Network(e) if e.is_timeout())
    }
}

/// 页面抓取器特质
///
/// 抓取一个列表页并返回提取出的记录批次。没有匹配行的页面返回空批次，
/// 仍然算作成功。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取并解析页面
    async fn fetch_and_parse(&self, url: &str) -> Result<Vec<Record>, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}

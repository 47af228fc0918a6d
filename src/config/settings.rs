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

use std::path::Path;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::utils::retry_policy::RetryPolicy;

/// 应用程序配置设置
///
/// 包含站点、爬取并发、HTTP抓取和重试等所有配置项
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// 站点配置
    #[validate(nested)]
    pub site: SiteSettings,
    /// 爬取并发配置
    #[validate(nested)]
    pub crawler: CrawlerSettings,
    /// HTTP抓取配置
    #[validate(nested)]
    pub fetch: FetchSettings,
    /// 重试配置
    #[validate(nested)]
    pub retry: RetrySettings,
}

/// 站点配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SiteSettings {
    /// 站点源，例如 https://pirateproxy.yt
    #[validate(url)]
    pub origin: String,
    /// 最新列表页数量
    #[validate(range(max = 1000))]
    pub recent_pages: u32,
    /// 固定的排行榜路径
    pub top_lists: Vec<String>,
}

/// 爬取并发配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CrawlerSettings {
    /// 工作器数量
    #[validate(range(min = 1, max = 256))]
    pub workers: usize,
    /// 热度阈值
    pub min_seeds: u64,
    /// 结果队列容量
    #[validate(range(min = 1))]
    pub result_queue_capacity: usize,
}

/// HTTP抓取配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FetchSettings {
    /// 请求超时时间（秒）
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
    /// User-Agent
    #[validate(length(min = 1))]
    pub user_agent: String,
    /// 非 2xx 响应是否视为失败
    pub require_success_status: bool,
}

/// 重试配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RetrySettings {
    /// 每个页面最多尝试次数，0 表示不限
    pub max_attempts: u32,
    /// 初始退避时间（毫秒）
    pub initial_backoff_ms: u64,
    /// 最大退避时间（毫秒）
    pub max_backoff_ms: u64,
    /// 退避乘数
    #[validate(range(min = 1.0))]
    pub backoff_multiplier: f64,
    /// 抖动因子
    #[validate(range(min = 0.0, max = 1.0))]
    pub jitter_factor: f64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `SEEDSCAN__` 前缀的环境变量，并校验结果
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Self::environment());

        Self::build(builder)
    }

    /// 从指定文件加载配置，环境变量仍然生效
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = Self::with_defaults()?
            .add_source(File::from(path.as_ref()).required(true))
            .add_source(Self::environment());

        Self::build(builder)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Default site settings
            .set_default("site.origin", "https://pirateproxy.yt")?
            .set_default("site.recent_pages", 30)?
            .set_default("site.top_lists", vec!["/top/48h200", "/top/48h500"])?
            // Default crawler settings
            .set_default("crawler.workers", 32)?
            .set_default("crawler.min_seeds", 100)?
            .set_default("crawler.result_queue_capacity", 1)?
            // Default fetch settings
            .set_default("fetch.timeout_secs", 15)?
            .set_default(
                "fetch.user_agent",
                concat!("seedscan/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("fetch.require_success_status", false)?
            // Default retry settings
            .set_default("retry.max_attempts", 10)?
            .set_default("retry.initial_backoff_ms", 0)?
            .set_default("retry.max_backoff_ms", 5000)?
            .set_default("retry.backoff_multiplier", 2.0)?
            .set_default("retry.jitter_factor", 0.1)
    }

    fn environment() -> Environment {
        Environment::with_prefix("SEEDSCAN")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("site.top_lists")
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid settings: {}", e)))?;
        Ok(settings)
    }

    /// 去掉末尾斜杠的站点源，便于直接拼接路径
    pub fn origin(&self) -> &str {
        self.site.origin.trim_end_matches('/')
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            initial_backoff: Duration::from_millis(self.retry.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.retry.max_backoff_ms),
            backoff_multiplier: self.retry.backoff_multiplier,
            jitter_factor: self.retry.jitter_factor,
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

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

use std::io::Write;
use std::sync::Arc;

use seedscan::application::use_cases::crawl_use_case::CrawlUseCase;
use seedscan::config::settings::Settings;
use seedscan::utils::telemetry;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点：加载配置，运行抓取，把表格写到标准输出
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting seedscan...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!(origin = settings.origin(), "Configuration loaded");

    // 3. Crawl
    let use_case = CrawlUseCase::from_settings(settings)?;
    let report = use_case.execute().await?;

    // 4. Render
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.render().as_bytes())?;
    stdout.flush()?;

    if !report.is_complete() {
        for page in &report.abandoned {
            error!(url = %page.url, attempts = page.attempts, reason = %page.reason, "Page abandoned");
        }
        anyhow::bail!("{} page(s) could not be fetched", report.abandoned.len());
    }

    info!(
        records = report.records.len(),
        pages = report.pages_completed,
        "Crawl finished"
    );
    Ok(())
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use seedscan::domain::models::record::Record;
use seedscan::engines::traits::{FetchError, PageFetcher};
use seedscan::utils::retry_policy::RetryPolicy;
use seedscan::workers::WorkerManager;

/// 每隔一次调用失败，成功时按页码返回一条记录
struct AlternatingFetcher {
    calls: AtomicU32,
}

#[async_trait]
impl PageFetcher for AlternatingFetcher {
    async fn fetch_and_parse(&self, url: &str) -> Result<Vec<Record>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call % 2 == 0 {
            return Err(FetchError::Parse("empty body".to_string()));
        }
        let seeds: u64 = url.trim_start_matches("/recent/").parse().unwrap_or(0);
        Ok(vec![Record::new(
            "Other",
            100 + seeds,
            url,
            format!("https://example.test{}", url),
        )])
    }

    fn name(&self) -> &'static str {
        "alternating"
    }
}

#[tokio::test]
async fn test_manager_completes_with_retries_through_public_api() {
    let fetcher = Arc::new(AlternatingFetcher {
        calls: AtomicU32::new(0),
    });
    let manager = WorkerManager::new(fetcher.clone(), 8, RetryPolicy::unlimited());
    let urls: Vec<String> = (0..30).map(|i| format!("/recent/{}", i)).collect();

    let report = tokio::time::timeout(Duration::from_secs(10), manager.run(urls))
        .await
        .expect("crawl did not terminate")
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.pages_completed, 30);
    let seeds: Vec<u64> = report.records.iter().map(|r| r.seeds).collect();
    assert_eq!(seeds, (100..130).collect::<Vec<_>>());
    assert!(fetcher.calls.load(Ordering::SeqCst) >= 30);
}

#[tokio::test]
async fn test_manager_with_backoff_still_terminates() {
    let fetcher = Arc::new(AlternatingFetcher {
        calls: AtomicU32::new(0),
    });
    let policy = RetryPolicy::with_backoff(0, Duration::from_millis(5));
    let manager = WorkerManager::new(fetcher, 3, policy).with_result_queue_capacity(4);
    let urls: Vec<String> = (0..6).map(|i| format!("/recent/{}", i)).collect();

    let report = tokio::time::timeout(Duration::from_secs(10), manager.run(urls))
        .await
        .expect("crawl did not terminate")
        .unwrap();

    assert_eq!(report.records.len(), 6);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use seedscan::application::use_cases::crawl_use_case::CrawlUseCase;
use seedscan::domain::models::record::Record;

use super::helpers::{listing_page, MockSite, Row};

fn keys(records: &[Record]) -> Vec<(&str, u64)> {
    records
        .iter()
        .map(|r| (r.category.as_str(), r.seeds))
        .collect()
}

async fn populated_site() -> MockSite {
    let site = MockSite::start().await;

    site.serve(
        "/recent/0",
        listing_page(&[
            Row {
                category: "Video\n    (HD - Movies)",
                title: "Big Film",
                href: "/torrent/1/big-film",
                seeds: "450",
            },
            Row {
                category: "Audio (Music)",
                title: "Quiet Album",
                href: "/torrent/2/quiet-album",
                seeds: "12",
            },
        ]),
    )
    .await;

    // Transient outage on the second page, the empty 503 body fails to parse
    site.fail_first("/recent/1", 503, 1).await;
    site.serve(
        "/recent/1",
        listing_page(&[Row {
            category: "Audio (Music)",
            title: "Loud Album",
            href: "/torrent/3/loud-album",
            seeds: "100",
        }]),
    )
    .await;

    site.serve(
        "/recent/2",
        listing_page(&[Row {
            category: "Games (PC)",
            title: "Unknown",
            href: "/torrent/4/unknown",
            seeds: "N/A",
        }]),
    )
    .await;

    site.serve(
        "/top/48h200",
        listing_page(&[
            Row {
                category: "Video (HD - Movies)",
                title: "Other Film",
                href: "/torrent/5/other-film",
                seeds: "120",
            },
            Row {
                category: "Applications (Windows)",
                title: "Tool",
                href: "https://mirror.test/torrent/6/tool",
                seeds: "99",
            },
        ]),
    )
    .await;

    site
}

#[tokio::test]
async fn test_crawl_collects_filters_and_sorts_across_pages() {
    let site = populated_site().await;
    let settings = Arc::new(site.settings(3, &["/top/48h200"], ""));

    let use_case = CrawlUseCase::from_settings(settings).unwrap();
    assert_eq!(use_case.urls().len(), 4);

    let report = tokio::time::timeout(Duration::from_secs(30), use_case.execute())
        .await
        .expect("crawl did not terminate")
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.pages_completed, 4);
    assert_eq!(
        keys(&report.records),
        vec![
            ("Audio (Music)", 100),
            ("Video (HD - Movies)", 120),
            ("Video (HD - Movies)", 450),
        ]
    );

    let origin = site.origin();
    assert!(report.records.iter().all(|r| r.seeds >= 100));
    assert!(report.records.iter().all(|r| r.url.starts_with(&origin)));
    assert_eq!(report.records[0].url, format!("{}/torrent/3/loud-album", origin));
    assert_eq!(report.records[0].title, "Loud Album");
}

#[tokio::test]
async fn test_crawl_report_renders_table() {
    let site = populated_site().await;
    let settings = Arc::new(site.settings(3, &["/top/48h200"], ""));

    let report = CrawlUseCase::from_settings(settings)
        .unwrap()
        .execute()
        .await
        .unwrap();
    let table = report.render();

    let lines: Vec<&str> = table.lines().collect();
    // border, header, border, three rows, border
    assert_eq!(lines.len(), 7);
    assert!(lines[1].contains("Category"));
    assert!(lines[3].starts_with("| Audio (Music) "));
    assert!(lines[5].contains(&format!("{}/torrent/1/big-film", site.origin())));
}

#[tokio::test]
async fn test_crawl_honours_min_seeds_override() {
    let site = populated_site().await;
    let mut settings = site.settings(3, &["/top/48h200"], "");
    settings.crawler.min_seeds = 400;

    let report = CrawlUseCase::from_settings(Arc::new(settings))
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert_eq!(keys(&report.records), vec![("Video (HD - Movies)", 450)]);
}

#[tokio::test]
async fn test_permanently_broken_page_is_reported_as_abandoned() {
    let site = populated_site().await;
    site.always_fail("/top/48h500", 500).await;
    let settings = Arc::new(site.settings(1, &["/top/48h500"], "[retry]\nmax_attempts = 3\n"));

    let report = tokio::time::timeout(
        Duration::from_secs(30),
        CrawlUseCase::from_settings(settings).unwrap().execute(),
    )
    .await
    .expect("crawl did not terminate")
    .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.pages_completed, 1);
    assert_eq!(report.abandoned.len(), 1);
    assert_eq!(report.abandoned[0].url, format!("{}/top/48h500", site.origin()));
    assert_eq!(report.abandoned[0].attempts, 3);
    assert_eq!(keys(&report.records), vec![("Video (HD - Movies)", 450)]);
}

#[tokio::test]
async fn test_error_status_page_with_listing_is_parsed_by_default() {
    let site = MockSite::start().await;
    site.serve_with_status(
        "/top/48h200",
        404,
        listing_page(&[Row {
            category: "Other (E-books)",
            title: "Manual",
            href: "/torrent/9/manual",
            seeds: "250",
        }]),
    )
    .await;
    let settings = Arc::new(site.settings(0, &["/top/48h200"], ""));

    let report = CrawlUseCase::from_settings(settings)
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.pages_completed, 1);
    assert_eq!(keys(&report.records), vec![("Other (E-books)", 250)]);
}

#[tokio::test]
async fn test_unmatched_page_is_abandoned_when_status_is_required() {
    let site = MockSite::start().await;
    let mut settings = site.settings(0, &["/missing"], "[retry]\nmax_attempts = 2\n");
    settings.fetch.require_success_status = true;
    let settings = Arc::new(settings);

    let report = CrawlUseCase::from_settings(settings)
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert_eq!(report.abandoned.len(), 1);
    assert_eq!(report.abandoned[0].attempts, 2);
    assert!(report.abandoned[0].reason.contains("404"));
    assert!(report.records.is_empty());
    assert_eq!(report.render().lines().count(), 3);
}

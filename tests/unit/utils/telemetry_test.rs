// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use seedscan::utils::telemetry;

#[test]
fn test_telemetry_installs_global_subscriber() {
    telemetry::init_telemetry();

    assert!(tracing::dispatcher::has_been_set());
    tracing::info!(url = "http://localhost/recent/0", attempt = 2, "Page fetched");
}

#[test]
fn test_telemetry_initialization_is_idempotent() {
    telemetry::init_telemetry();

    // A subscriber is already installed, later calls keep it
    assert!(!telemetry::init_telemetry());
    assert!(!telemetry::init_telemetry());
    assert!(tracing::dispatcher::has_been_set());
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the zoneport importer.
//!
//! All metrics share the namespace prefix `zoneport_` and are registered in
//! [`METRICS_REGISTRY`], exposed by the API server at `/metrics`.

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all zoneport metrics
const METRICS_NAMESPACE: &str = "zoneport";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via the `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of import requests by outcome
///
/// Labels:
/// - `outcome`: `success`, `partial`, or `failure` (the §200/207/400 split)
pub static IMPORT_REQUESTS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_import_requests_total"),
        "Total number of import requests by outcome",
    );
    let counter = CounterVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Per-record import outcomes
///
/// Labels:
/// - `record_type`: DNS record type (`A`, `MX`, ...)
/// - `action`: `created`, `updated`, `skipped`, or `failed`
pub static RECORDS_IMPORTED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_records_imported_total"),
        "Per-record import outcomes by record type and action",
    );
    let counter = CounterVec::new(opts, &["record_type", "action"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of import reconciliations in seconds
///
/// Labels:
/// - `strategy`: merge strategy of the request (`append`, `replace`)
pub static IMPORT_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_import_duration_seconds"),
        "Duration of import reconciliations in seconds by merge strategy",
    )
    .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]);
    let histogram = HistogramVec::new(opts, &["strategy"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Control-plane failures observed during reconciliation
///
/// Labels:
/// - `reason`: CamelCase reason code from `ControlPlaneError::reason()`
pub static CONTROL_PLANE_FAILURES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_control_plane_failures_total"),
        "Control-plane failures observed during reconciliation by reason",
    );
    let counter = CounterVec::new(opts, &["reason"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Zone discovery polls by result
///
/// Labels:
/// - `result`: `ready`, `pending`, `failed`, or `timeout`
pub static DISCOVERY_POLLS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_discovery_polls_total"),
        "Zone discovery poll attempts by result",
    );
    let counter = CounterVec::new(opts, &["result"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Record one finished import request.
pub fn record_import_request(status: u16, strategy: &str, duration: Duration) {
    let outcome = match status {
        200 => "success",
        207 => "partial",
        _ => "failure",
    };
    IMPORT_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
    IMPORT_DURATION_SECONDS
        .with_label_values(&[strategy])
        .observe(duration.as_secs_f64());
}

/// Render all registered metrics in the Prometheus text format.
#[must_use]
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder
        .encode(&METRICS_REGISTRY.gather(), &mut buffer)
        .is_err()
    {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod metrics_tests;

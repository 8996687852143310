//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog cache decisions (hit vs refresh, per query kind)
//! - Upstream provider requests
//! - Best-effort cache write failures

use once_cell::sync::Lazy;
use prometheus::{core::Collector, IntCounter, IntCounterVec, Opts};

/// Cache decisions per query kind.
pub static CACHE_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineshelf_cache_decisions_total",
            "Catalog cache decisions by query kind",
        ),
        &["query", "decision"], // decision: "hit" or "refresh"
    )
    .unwrap()
});

/// Upstream provider requests by endpoint and outcome.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cineshelf_upstream_requests_total",
            "Requests issued to the metadata provider",
        ),
        &["endpoint", "result"], // result: "ok" or "error"
    )
    .unwrap()
});

/// Cache writes that were skipped after a persistence failure.
pub static CACHE_WRITE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cineshelf_cache_write_failures_total",
        "Best-effort cache writes that failed and were skipped",
    )
    .unwrap()
});

/// All core metrics, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(CACHE_DECISIONS.clone()),
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(CACHE_WRITE_FAILURES.clone()),
    ]
}

//! Prometheus metrics for core components.
//!
//! Covers the search gateway, the TTL cache and the ingestion pass. HTTP
//! metrics live in the server crate.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search gateway
// =============================================================================

/// Upstream search calls by result.
pub static GATEWAY_SEARCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("vidrail_gateway_searches_total", "Upstream search calls"),
        &["result"], // "ok", "quota", "error"
    )
    .unwrap()
});

/// Videos returned per successful gateway call.
pub static GATEWAY_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "vidrail_gateway_results",
            "Videos returned per upstream search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0]),
    )
    .unwrap()
});

// =============================================================================
// TTL cache
// =============================================================================

/// Cache lookups by outcome.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("vidrail_cache_lookups_total", "Video cache lookups"),
        &["outcome"], // "hit", "miss", "expired"
    )
    .unwrap()
});

// =============================================================================
// Ingestion
// =============================================================================

/// Completed ingestion passes.
pub static INGEST_PASSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("vidrail_ingest_passes_total", "Completed ingestion passes").unwrap()
});

/// Subcategories processed during ingestion, by result.
pub static INGEST_SUBCATEGORIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vidrail_ingest_subcategories_total",
            "Subcategories processed during ingestion",
        ),
        &["result"], // "ok", "empty", "failed"
    )
    .unwrap()
});

/// Video rows written by the ingestion pass.
pub static VIDEOS_UPSERTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vidrail_videos_upserted_total",
        "Video rows written by ingestion",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(GATEWAY_SEARCHES.clone()),
        Box::new(GATEWAY_RESULTS.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(INGEST_PASSES.clone()),
        Box::new(INGEST_SUBCATEGORIES.clone()),
        Box::new(VIDEOS_UPSERTED.clone()),
    ]
}

//! Metrics and observability utilities
//!
//! Provides metric descriptions and record helpers with standardized
//! naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

/// Metrics prefix for all cdpbot metrics
pub const METRICS_PREFIX: &str = "cdpbot";

/// Histogram buckets for question latency (in seconds); network-bound,
/// bounded by the 10 s per-fetch timeout across a handful of pages
pub const LATENCY_BUCKETS: &[f64] = &[
    0.010, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000, 10.00, 30.00, 60.00,
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_questions_total", METRICS_PREFIX),
        Unit::Count,
        "Total questions processed"
    );

    describe_histogram!(
        format!("{}_question_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "End-to-end question latency in seconds"
    );

    describe_counter!(
        format!("{}_fetches_total", METRICS_PREFIX),
        Unit::Count,
        "Total documentation page fetches"
    );

    describe_counter!(
        format!("{}_fetch_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Documentation page fetches that failed"
    );

    describe_counter!(
        format!("{}_snippets_extracted_total", METRICS_PREFIX),
        Unit::Count,
        "Documentation snippets extracted"
    );

    describe_counter!(
        format!("{}_cache_hits_total", METRICS_PREFIX),
        Unit::Count,
        "Documentation cache hits"
    );

    describe_counter!(
        format!("{}_cache_misses_total", METRICS_PREFIX),
        Unit::Count,
        "Documentation cache misses"
    );
}

/// Record a processed question with its outcome tag
pub fn record_question(duration_secs: f64, outcome: &str) {
    counter!(
        format!("{}_questions_total", METRICS_PREFIX),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!(format!("{}_question_duration_seconds", METRICS_PREFIX)).record(duration_secs);
}

/// Record a documentation fetch attempt
pub fn record_fetch(platform: &str, success: bool) {
    counter!(
        format!("{}_fetches_total", METRICS_PREFIX),
        "platform" => platform.to_string()
    )
    .increment(1);
    if !success {
        counter!(
            format!("{}_fetch_failures_total", METRICS_PREFIX),
            "platform" => platform.to_string()
        )
        .increment(1);
    }
}

/// Record extracted snippets for a platform
pub fn record_snippets(platform: &str, count: usize) {
    counter!(
        format!("{}_snippets_extracted_total", METRICS_PREFIX),
        "platform" => platform.to_string()
    )
    .increment(count as u64);
}

/// Record a cache lookup result
pub fn record_cache_lookup(platform: &str, hit: bool) {
    let name = if hit {
        format!("{}_cache_hits_total", METRICS_PREFIX)
    } else {
        format!("{}_cache_misses_total", METRICS_PREFIX)
    };
    counter!(name, "platform" => platform.to_string()).increment(1);
}

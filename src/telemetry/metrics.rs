//! Metric registration and recording helpers.
//!
//! Thin wrappers over the `metrics` facade. All calls are no-ops until the
//! host installs a recorder.

use metrics::{describe_counter, describe_gauge, gauge};

/// Register metric descriptions with the installed recorder.
///
/// Call once at host startup, after the recorder is installed.
pub fn init_metrics() {
    describe_counter!(
        "perf_cache_lookups_total",
        "Total compute cache lookups (hits plus misses)"
    );
    describe_counter!("perf_cache_hits_total", "Compute cache lookups served from cache");
    describe_counter!(
        "perf_cache_misses_total",
        "Compute cache lookups that ran the computation"
    );
    describe_gauge!("perf_matrix_pool_entries", "Matrices currently pooled across all shapes");
    describe_gauge!("perf_batch_queue_depth", "Items currently queued for batch extraction");
}

/// Record current batch queue depth.
pub fn record_queue_depth(depth: usize) {
    gauge!("perf_batch_queue_depth").set(depth as f64);
}

/// Record current pooled matrix count.
pub fn record_pool_size(pooled: usize) {
    gauge!("perf_matrix_pool_entries").set(pooled as f64);
}

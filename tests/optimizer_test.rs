//! Tests for the optimizer facade and the process-wide handle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ime_perf_core::memory::{ComputeCacheConfig, MatrixPoolConfig};
use ime_perf_core::{global, install_global, reset_global, OptimizerConfig, PerformanceOptimizer};

#[test]
fn facade_memoizes_through_the_cache() {
    let optimizer = PerformanceOptimizer::default();
    let calls = AtomicUsize::new(0);

    let first = optimizer.get_or_compute("candidates:thr", || {
        calls.fetch_add(1, Ordering::SeqCst);
        vec!["the", "three", "throw"]
    });
    let second = optimizer.get_or_compute("candidates:thr", || {
        calls.fetch_add(1, Ordering::SeqCst);
        vec![]
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));

    let metrics = optimizer.metrics();
    assert_eq!(metrics.total_operations, 2);
    assert_eq!(metrics.cache_hits, 1);
    assert_eq!(metrics.cache_misses, 1);
}

#[test]
fn facade_round_trips_matrices_through_the_pool() {
    let optimizer = PerformanceOptimizer::default();

    let mut m = optimizer.acquire_matrix(8, 8);
    m.set(0, 0, 3.5).unwrap();
    optimizer.release_matrix(m);

    assert_eq!(optimizer.pool().available(8, 8), 1);
    let reused = optimizer.acquire_matrix(8, 8);
    assert_eq!(reused.get(0, 0).unwrap(), 0.0);
}

#[test]
fn facade_clear_cache_drops_entries_but_not_counters() {
    let optimizer = PerformanceOptimizer::default();
    optimizer.get_or_compute("k", || 1u32);

    optimizer.clear_cache();

    assert!(optimizer.cache().is_empty());
    assert_eq!(optimizer.metrics().total_operations, 1);
}

#[test]
fn facade_trim_cache_evicts_to_target() {
    let optimizer = PerformanceOptimizer::new(OptimizerConfig {
        cache: ComputeCacheConfig { max_entries: 64 },
        pool: MatrixPoolConfig::default(),
    });
    for i in 0..10 {
        optimizer.get_or_compute(&format!("k{i}"), || i);
    }

    optimizer.trim_cache(4);

    assert_eq!(optimizer.cache().len(), 4);
}

#[test]
fn metrics_snapshot_serializes() {
    let optimizer = PerformanceOptimizer::default();
    optimizer.get_or_compute("k", || 1u32);
    optimizer.get_or_compute("k", || 1u32);

    let json = serde_json::to_value(optimizer.metrics()).unwrap();

    assert_eq!(json["total_operations"], 2);
    assert_eq!(json["cache_hits"], 1);
    assert_eq!(json["cache_misses"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[test]
fn global_handle_lifecycle() {
    // Single test for the process-wide handle: the tests in this binary run
    // in parallel and the handle is shared state.
    reset_global();

    let a = global();
    let b = global();
    assert!(Arc::ptr_eq(&a, &b));

    a.get_or_compute("g", || 1u32);
    assert_eq!(global().metrics().total_operations, 1);

    reset_global();
    let fresh = global();
    assert!(!Arc::ptr_eq(&a, &fresh));
    assert_eq!(fresh.metrics().total_operations, 0);

    let installed = install_global(OptimizerConfig {
        cache: ComputeCacheConfig { max_entries: 8 },
        pool: MatrixPoolConfig { max_per_shape: 2 },
    });
    assert!(Arc::ptr_eq(&installed, &global()));

    reset_global();
}

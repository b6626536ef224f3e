//! IME Performance Core
//!
//! In-process performance substrate for a latency-sensitive input-method
//! service. Reduces allocation churn on the hot path with three independent
//! facilities:
//!
//! - **Compute cache**: key to value memoization with deterministic,
//!   capacity-bounded LRU eviction. Absence of an entry only ever means the
//!   value must be recomputed.
//! - **Matrix pool**: shape-keyed reuse of fixed-size float matrices, with
//!   a per-shape retention bound.
//! - **Batch queue**: generic FIFO with batched extraction to amortize
//!   per-item locking for bulk consumers.
//!
//! All state is in-memory and process-local. Every call completes
//! synchronously; critical sections are O(1) to O(batch size).
//!
//! Prefer constructing a [`PerformanceOptimizer`] and passing it to
//! consumers. Hosts that need ambient access can use [`global`], with
//! [`reset_global`] as the teardown hook for test isolation.

pub mod matrix;
pub mod memory;
pub mod scheduler;
pub mod telemetry;

use std::sync::Arc;

use parking_lot::RwLock;

use matrix::Matrix;
use memory::{ComputeCache, ComputeCacheConfig, MatrixPool, MatrixPoolConfig};

pub use memory::PerformanceMetrics;

/// Substrate configuration.
#[derive(Debug, Clone, Default)]
pub struct OptimizerConfig {
    pub cache: ComputeCacheConfig,
    pub pool: MatrixPoolConfig,
}

/// Facade composing the compute cache and the matrix pool.
///
/// The batch queue is consumed directly by callers; it carries no shared
/// state with the facade.
pub struct PerformanceOptimizer {
    cache: ComputeCache,
    pool: MatrixPool,
}

impl PerformanceOptimizer {
    /// Create a new optimizer instance with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            cache: ComputeCache::new(config.cache),
            pool: MatrixPool::new(config.pool),
        }
    }

    /// Memoized computation. See [`ComputeCache::get_or_compute`].
    pub fn get_or_compute<T, F>(&self, key: &str, compute: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.cache.get_or_compute(key, compute)
    }

    /// Fallible memoized computation. See
    /// [`ComputeCache::try_get_or_compute`].
    pub fn try_get_or_compute<T, E, F>(&self, key: &str, compute: F) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        self.cache.try_get_or_compute(key, compute)
    }

    /// Drop all cached values immediately.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Evict coldest cache entries down to `target_entries`. Wire the
    /// host's memory-pressure callback here.
    pub fn trim_cache(&self, target_entries: usize) {
        self.cache.trim(target_entries);
    }

    /// Snapshot of the cache operation counters.
    pub fn metrics(&self) -> PerformanceMetrics {
        self.cache.metrics()
    }

    /// Acquire a zeroed matrix of the given shape from the pool.
    pub fn acquire_matrix(&self, rows: usize, cols: usize) -> Matrix {
        self.pool.acquire(rows, cols)
    }

    /// Return a matrix to the pool.
    pub fn release_matrix(&self, matrix: Matrix) {
        self.pool.release(matrix);
    }

    /// The underlying cache, for introspection.
    pub fn cache(&self) -> &ComputeCache {
        &self.cache
    }

    /// The underlying pool, for introspection.
    pub fn pool(&self) -> &MatrixPool {
        &self.pool
    }
}

impl Default for PerformanceOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

static GLOBAL: RwLock<Option<Arc<PerformanceOptimizer>>> = RwLock::new(None);

/// Process-wide optimizer handle, created lazily exactly once.
///
/// Every caller sees the same instance until [`reset_global`] tears it
/// down.
pub fn global() -> Arc<PerformanceOptimizer> {
    if let Some(optimizer) = GLOBAL.read().as_ref() {
        return Arc::clone(optimizer);
    }

    let mut slot = GLOBAL.write();
    // Another thread may have initialized while we waited for the lock.
    if let Some(optimizer) = slot.as_ref() {
        return Arc::clone(optimizer);
    }
    let optimizer = Arc::new(PerformanceOptimizer::default());
    *slot = Some(Arc::clone(&optimizer));
    optimizer
}

/// Install a specifically configured process-wide instance, replacing any
/// existing one. Intended for host startup, before the first [`global`]
/// call.
pub fn install_global(config: OptimizerConfig) -> Arc<PerformanceOptimizer> {
    let optimizer = Arc::new(PerformanceOptimizer::new(config));
    *GLOBAL.write() = Some(Arc::clone(&optimizer));
    optimizer
}

/// Tear down the process-wide instance. The next [`global`] call creates a
/// fresh one; use between tests for isolation.
pub fn reset_global() {
    *GLOBAL.write() = None;
}

//! Memoizing compute cache with hit/miss accounting.
//!
//! Uses DashMap for concurrent access without global locks. Entries are
//! strongly owned and evicted deterministically, least recently used
//! first, when the entry cap is reached or the host triggers a trim.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Configuration for the compute cache.
#[derive(Debug, Clone)]
pub struct ComputeCacheConfig {
    /// Maximum entries retained before LRU eviction kicks in.
    pub max_entries: usize,
}

impl Default for ComputeCacheConfig {
    fn default() -> Self {
        Self { max_entries: 256 }
    }
}

/// Point-in-time snapshot of the cache counters.
///
/// The three counters are read independently, so fields may be transiently
/// skewed relative to each other under concurrent traffic. Each counter is
/// monotonic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_operations: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub hit_rate: f64,
}

struct CacheSlot {
    value: Arc<dyn Any + Send + Sync>,
    last_used: AtomicU64,
}

/// Key to value memoization with deterministic eviction.
///
/// Values are stored as `Arc<dyn Any>` so callers can memoize arbitrary
/// result types under string keys. An entry may be evicted between any two
/// calls; absence only means the value must be recomputed.
pub struct ComputeCache {
    entries: DashMap<String, CacheSlot>,
    access_counter: AtomicU64,
    total_operations: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    config: ComputeCacheConfig,
}

impl ComputeCache {
    pub fn new(config: ComputeCacheConfig) -> Self {
        Self {
            entries: DashMap::with_capacity(config.max_entries),
            access_counter: AtomicU64::new(0),
            total_operations: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            config,
        }
    }

    /// Return the cached value for `key`, computing and storing it on a
    /// miss.
    ///
    /// `compute` runs synchronously on the calling thread, outside any lock
    /// the cache holds. Two threads missing the same key concurrently both
    /// compute; the last insert wins.
    pub fn get_or_compute<T, F>(&self, key: &str, compute: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let stamp = self.begin_operation();
        if let Some(value) = self.lookup::<T>(key, stamp) {
            return value;
        }

        self.record_miss();
        let value = Arc::new(compute());
        self.store(key, value.clone(), stamp);
        value
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// A computation error propagates unchanged and leaves no entry behind;
    /// the attempt still counts as a miss.
    pub fn try_get_or_compute<T, E, F>(&self, key: &str, compute: F) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        let stamp = self.begin_operation();
        if let Some(value) = self.lookup::<T>(key, stamp) {
            return Ok(value);
        }

        self.record_miss();
        let value = Arc::new(compute()?);
        self.store(key, value.clone(), stamp);
        Ok(value)
    }

    /// Remove all entries immediately. Counters survive.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Evict coldest entries until at most `target_entries` remain.
    ///
    /// Hook for host memory-pressure callbacks; eviction order is least
    /// recently used first.
    pub fn trim(&self, target_entries: usize) {
        while self.entries.len() > target_entries {
            if !self.evict_lru() {
                break;
            }
        }
    }

    /// Snapshot the operation counters.
    pub fn metrics(&self) -> PerformanceMetrics {
        let total = self.total_operations.load(Ordering::Relaxed);
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        PerformanceMetrics {
            total_operations: total,
            cache_hits: hits,
            cache_misses: misses,
            hit_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count the operation and mint an LRU stamp for it.
    fn begin_operation(&self) -> u64 {
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("perf_cache_lookups_total").increment(1);
        self.access_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("perf_cache_misses_total").increment(1);
    }

    fn lookup<T>(&self, key: &str, stamp: u64) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let slot = self.entries.get(key)?;
        slot.last_used.store(stamp, Ordering::Relaxed);
        match Arc::clone(&slot.value).downcast::<T>() {
            Ok(value) => {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("perf_cache_hits_total").increment(1);
                Some(value)
            }
            // Key reused with a different concrete type: treat as a miss
            // and let the caller's computation replace the entry.
            Err(_) => None,
        }
    }

    fn store<T>(&self, key: &str, value: Arc<T>, stamp: u64)
    where
        T: Send + Sync + 'static,
    {
        let value: Arc<dyn Any + Send + Sync> = value;
        if self.entries.len() >= self.config.max_entries && !self.entries.contains_key(key) {
            self.evict_lru();
        }
        self.entries.insert(
            key.to_string(),
            CacheSlot {
                value,
                last_used: AtomicU64::new(stamp),
            },
        );
    }

    /// Evict the entry with the oldest LRU stamp. Returns false when the
    /// cache is already empty.
    fn evict_lru(&self) -> bool {
        let coldest = self
            .entries
            .iter()
            .min_by_key(|slot| slot.value().last_used.load(Ordering::Relaxed))
            .map(|slot| slot.key().clone());

        match coldest {
            Some(key) => {
                tracing::debug!(key = %key, "evicting least recently used cache entry");
                self.entries.remove(&key);
                true
            }
            None => false,
        }
    }
}

impl Default for ComputeCache {
    fn default() -> Self {
        Self::new(ComputeCacheConfig::default())
    }
}

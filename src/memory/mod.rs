//! Memory reuse for the performance substrate.
//!
//! Provides the shape-keyed matrix pool and the memoizing compute cache.

mod cache;
mod pool;

pub use cache::{ComputeCache, ComputeCacheConfig, PerformanceMetrics};
pub use pool::{MatrixPool, MatrixPoolConfig};

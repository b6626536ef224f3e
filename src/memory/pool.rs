//! Shape-keyed matrix pooling for allocation reuse.
//!
//! Uses parking_lot::Mutex for fast synchronous locking.
//! No async overhead or runtime requirement.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::matrix::Matrix;

/// Configuration for the matrix pool.
#[derive(Debug, Clone)]
pub struct MatrixPoolConfig {
    /// Maximum matrices retained per distinct shape.
    pub max_per_shape: usize,
}

impl Default for MatrixPoolConfig {
    fn default() -> Self {
        Self { max_per_shape: 16 }
    }
}

/// Thread-safe pool of released matrices, keyed by shape.
///
/// Best-effort reuse: `acquire` prefers a pooled matrix of the exact shape
/// and falls back to a fresh allocation. Every pooled matrix is zeroed at
/// release time, so `acquire` never returns stale data.
pub struct MatrixPool {
    shapes: Mutex<HashMap<(usize, usize), VecDeque<Matrix>>>,
    config: MatrixPoolConfig,
}

impl MatrixPool {
    pub fn new(config: MatrixPoolConfig) -> Self {
        Self {
            shapes: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Acquire a zeroed matrix of the given shape, reusing a pooled one
    /// when available. The caller owns the matrix exclusively until
    /// `release`.
    pub fn acquire(&self, rows: usize, cols: usize) -> Matrix {
        let pooled = {
            let mut shapes = self.shapes.lock();
            shapes.get_mut(&(rows, cols)).and_then(VecDeque::pop_front)
        };
        pooled.unwrap_or_else(|| Matrix::new(rows, cols))
    }

    /// Return a matrix to the pool for its shape.
    ///
    /// The matrix is zeroed before storage. If the shape's free list is
    /// already at capacity the matrix is dropped instead, bounding the
    /// memory the pool retains.
    pub fn release(&self, mut matrix: Matrix) {
        matrix.reset();
        let shape = matrix.shape();

        let mut shapes = self.shapes.lock();
        let free_list = shapes.entry(shape).or_default();
        if free_list.len() < self.config.max_per_shape {
            free_list.push_back(matrix);
        } else {
            tracing::trace!(?shape, "matrix pool full, dropping released matrix");
        }
    }

    /// Drop all pooled matrices. Matrices held by callers are unaffected.
    pub fn clear(&self) {
        self.shapes.lock().clear();
    }

    /// Number of pooled matrices available for the given shape.
    pub fn available(&self, rows: usize, cols: usize) -> usize {
        self.shapes
            .lock()
            .get(&(rows, cols))
            .map_or(0, VecDeque::len)
    }

    /// Total pooled matrices across all shapes.
    pub fn pooled_total(&self) -> usize {
        self.shapes.lock().values().map(VecDeque::len).sum()
    }
}

impl Default for MatrixPool {
    fn default() -> Self {
        Self::new(MatrixPoolConfig::default())
    }
}

//! Work batching for the performance substrate.
//!
//! Hosts the generic FIFO used to amortize per-item overhead for bulk
//! consumers.

mod queue;

#[cfg(test)]
mod queue_tests;

pub use queue::BatchQueue;

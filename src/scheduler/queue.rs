//! Bounded-latency FIFO with batched extraction.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Thread-safe FIFO queue with single and batched dequeue.
///
/// Unbounded: enqueue always succeeds. Every operation runs under one short
/// critical section, O(1) for single-item calls and O(max_items) for batch
/// extraction, so callers amortize locking overhead by draining in batches
/// instead of item by item.
pub struct BatchQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> BatchQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Pre-allocate the ring for an expected burst size.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append an item at the tail.
    pub fn enqueue(&self, item: T) {
        self.items.lock().push_back(item);
    }

    /// Remove and return the head item, or `None` if the queue is empty.
    pub fn dequeue(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Remove up to `max_items` from the head, preserving order.
    ///
    /// Returns fewer items when the queue is exhausted first, and an empty
    /// vec on an empty queue. The whole batch is extracted under a single
    /// lock acquisition.
    pub fn dequeue_batch(&self, max_items: usize) -> Vec<T> {
        let mut items = self.items.lock();
        let count = max_items.min(items.len());
        items.drain(..count).collect()
    }

    /// Point-in-time queue length.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Point-in-time emptiness check.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T> Default for BatchQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

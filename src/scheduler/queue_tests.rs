//! Tests for the batch queue.

#[cfg(test)]
mod tests {
    use crate::scheduler::BatchQueue;

    #[test]
    fn dequeue_preserves_fifo_order() {
        let q = BatchQueue::new();
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);

        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn dequeue_batch_takes_head_in_order() {
        let q = BatchQueue::new();
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);

        assert_eq!(q.dequeue_batch(2), vec![1, 2]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn dequeue_batch_returns_short_batch_when_exhausted() {
        let q = BatchQueue::new();
        q.enqueue("a");
        q.enqueue("b");

        assert_eq!(q.dequeue_batch(10), vec!["a", "b"]);
        assert!(q.is_empty());
    }

    #[test]
    fn dequeue_batch_on_empty_queue_is_empty() {
        let q: BatchQueue<u32> = BatchQueue::new();
        assert!(q.dequeue_batch(8).is_empty());
    }

    #[test]
    fn dequeue_batch_of_zero_takes_nothing() {
        let q = BatchQueue::new();
        q.enqueue(7);
        assert!(q.dequeue_batch(0).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn len_tracks_enqueue_and_dequeue() {
        let q = BatchQueue::with_capacity(4);
        assert!(q.is_empty());

        q.enqueue(10);
        q.enqueue(20);
        assert_eq!(q.len(), 2);

        q.dequeue();
        assert_eq!(q.len(), 1);
        assert!(!q.is_empty());
    }
}

//! Tests for core queue functionality

#[cfg(test)]
mod tests {
    use crate::queue::api::{BoundedQueue, PushOutcome, TryPopError, TryPushError};

    #[test]
    fn test_queue_creation() {
        let queue = BoundedQueue::<u64>::new(8).unwrap();

        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(!queue.is_full());
        assert!(!queue.is_stopping());
        assert_eq!(queue.stats(), Default::default());
    }

    #[test]
    fn test_single_producer_fifo_order() {
        let queue = BoundedQueue::new(8).unwrap();

        for value in [1, 2, 3, 4, 5] {
            assert_eq!(queue.push(value), PushOutcome::Accepted);
        }
        queue.shutdown();

        let received: Vec<i32> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(received, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_counters_track_occupancy() {
        let queue = BoundedQueue::new(4).unwrap();

        queue.push("a");
        queue.push("b");
        queue.push("c");
        assert_eq!(queue.pop(), Some("a"));

        let snapshot = queue.snapshot();
        assert_eq!(snapshot.len, 2);
        assert_eq!(snapshot.stats.produced, 3);
        assert_eq!(snapshot.stats.consumed, 1);
        assert_eq!(snapshot.stats.in_flight(), 2);
        assert!(snapshot.is_consistent());
    }

    #[test]
    fn test_try_push_reports_full_and_returns_value() {
        let queue = BoundedQueue::new(1).unwrap();

        assert!(queue.try_push(String::from("first")).is_ok());

        match queue.try_push(String::from("second")) {
            Err(err) => {
                assert!(err.is_full());
                assert_eq!(err.to_string(), "queue is full");
                assert_eq!(err.into_inner(), "second");
            }
            Ok(()) => panic!("Expected Full error on a full queue"),
        }

        // A rejected try_push is not a wait event and not a loss
        let stats = queue.stats();
        assert_eq!(stats.wait_on_full, 0);
        assert_eq!(stats.dropped, 0);
        assert_eq!(stats.produced, 1);
    }

    #[test]
    fn test_try_pop_on_empty_queue() {
        let queue = BoundedQueue::<u8>::new(2).unwrap();

        assert_eq!(queue.try_pop(), Err(TryPopError::Empty));
        assert_eq!(queue.stats().wait_on_empty, 0);

        queue.push(7);
        assert_eq!(queue.try_pop(), Ok(7));
        assert_eq!(queue.try_pop(), Err(TryPopError::Empty));
    }

    #[test]
    fn test_try_variants_after_shutdown() {
        let queue = BoundedQueue::new(2).unwrap();
        queue.push(1);
        queue.shutdown();

        assert_eq!(queue.try_push(2), Err(TryPushError::Stopped(2)));
        assert_eq!(queue.try_pop(), Ok(1));
        assert_eq!(queue.try_pop(), Err(TryPopError::Stopped));
        assert_eq!(queue.stats().dropped, 0);
    }

    #[test]
    fn test_blocking_and_non_blocking_calls_share_the_ring() {
        let queue = BoundedQueue::new(3).unwrap();

        queue.push(1);
        queue.try_push(2).unwrap();
        queue.push(3);

        assert_eq!(queue.try_pop(), Ok(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.try_pop(), Ok(3));
        assert!(queue.snapshot().is_consistent());
    }
}

//! Queue shutdown releasing every blocked task

use ringq::queue::{BoundedQueue, PushOutcome};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn wait_until(condition: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_shutdown_releases_consumers_on_empty_queue() {
    let queue: Arc<BoundedQueue<u64>> = Arc::new(BoundedQueue::new(4).unwrap());

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        })
        .collect();

    wait_until(|| queue.stats().wait_on_empty >= 3);
    queue.shutdown();

    for consumer in consumers {
        assert_eq!(consumer.join().unwrap(), None);
    }
}

#[test]
fn test_shutdown_releases_producers_on_full_queue() {
    let queue = Arc::new(BoundedQueue::new(1).unwrap());
    assert_eq!(queue.push(0u64), PushOutcome::Accepted);

    let producers: Vec<_> = (1..=2)
        .map(|value| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.push(value))
        })
        .collect();

    wait_until(|| queue.stats().wait_on_full >= 2);
    queue.shutdown();

    for producer in producers {
        assert_eq!(producer.join().unwrap(), PushOutcome::Dropped);
    }

    let snapshot = queue.snapshot();
    assert_eq!(snapshot.stats.dropped, 2);
    assert_eq!(snapshot.len, 1);
    // The item accepted before shutdown is still delivered
    assert_eq!(queue.pop(), Some(0));
    assert_eq!(queue.pop(), None);
}

//! Bounded ring queue with blocking push/pop and broadcast shutdown
//!
//! All cursor, occupancy, flag and counter state lives behind a single mutex.
//! Producers suspend on `not_full`, consumers on `not_empty`; nothing polls.

use crate::queue::error::{QueueError, QueueResult, TryPopError, TryPushError};
use crate::queue::types::{PushOutcome, QueueSnapshot, QueueStats};
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Fixed-size circular storage plus the bookkeeping guarded by the queue lock
struct RingState<T> {
    slots: Box<[Option<T>]>,
    /// Next write position
    head: usize,
    /// Next read position
    tail: usize,
    count: usize,
    stopping: bool,
    stats: QueueStats,
}

impl<T> RingState<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
            stopping: false,
            stats: QueueStats::default(),
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    fn write(&mut self, value: T) {
        debug_assert!(self.count < self.capacity());
        debug_assert!(self.slots[self.head].is_none());
        self.slots[self.head] = Some(value);
        self.head = (self.head + 1) % self.capacity();
        self.count += 1;
        self.stats.produced += 1;
    }

    /// Caller must have checked `count > 0`
    fn read(&mut self) -> Option<T> {
        let value = self.slots[self.tail].take()?;
        self.tail = (self.tail + 1) % self.capacity();
        self.count -= 1;
        self.stats.consumed += 1;
        Some(value)
    }

    fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            capacity: self.capacity(),
            len: self.count,
            stopping: self.stopping,
            stats: self.stats,
        }
    }
}

/// Bounded multi-producer/multi-consumer FIFO queue
///
/// Share it between threads with `Arc<BoundedQueue<T>>`. [`push`](Self::push)
/// blocks while the ring is full, [`pop`](Self::pop) blocks while it is
/// empty, and [`shutdown`](Self::shutdown) wakes every waiter so that
/// consumers drain what is left and then observe end-of-stream.
///
/// # Example
///
/// ```rust
/// use ringq::queue::{BoundedQueue, PushOutcome};
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(BoundedQueue::new(4).unwrap());
///
/// let consumer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         let mut received = Vec::new();
///         while let Some(value) = queue.pop() {
///             received.push(value);
///         }
///         received
///     })
/// };
///
/// // The fifth push blocks until the consumer frees a slot
/// for i in 1..=5 {
///     assert_eq!(queue.push(i), PushOutcome::Accepted);
/// }
/// // Values still in the ring are drained before end-of-stream
/// queue.shutdown();
///
/// assert_eq!(consumer.join().unwrap(), vec![1, 2, 3, 4, 5]);
/// ```
pub struct BoundedQueue<T> {
    state: Mutex<RingState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` values
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity { capacity });
        }

        Ok(Self {
            state: Mutex::new(RingState::with_capacity(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    // Queue code never panics while holding the guard, so a poisoned lock
    // still protects a consistent ring.
    fn lock(&self) -> MutexGuard<'_, RingState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert `value`, blocking while the ring is full
    ///
    /// Returns [`PushOutcome::Dropped`] if the queue is (or becomes, while
    /// this call is blocked) shut down; the value is discarded in that case.
    pub fn push(&self, value: T) -> PushOutcome {
        let mut state = self.lock();

        while state.is_full() && !state.stopping {
            state.stats.wait_on_full += 1;
            state = self
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.stopping {
            state.stats.dropped += 1;
            return PushOutcome::Dropped;
        }

        state.write(value);
        self.not_empty.notify_one();
        PushOutcome::Accepted
    }

    /// Remove the oldest value, blocking while the ring is empty
    ///
    /// Returns `None` once the queue is shut down and drained. Every later
    /// call returns `None` immediately.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.lock();

        while state.count == 0 && !state.stopping {
            state.stats.wait_on_empty += 1;
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.count == 0 {
            return None;
        }

        let value = state.read();
        self.not_full.notify_one();
        value
    }

    /// Insert `value` only if a slot is free right now
    pub fn try_push(&self, value: T) -> Result<(), TryPushError<T>> {
        let mut state = self.lock();

        if state.stopping {
            return Err(TryPushError::Stopped(value));
        }
        if state.is_full() {
            return Err(TryPushError::Full(value));
        }

        state.write(value);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest value only if one is available right now
    ///
    /// A stopped queue still hands out whatever it holds before reporting
    /// [`TryPopError::Stopped`].
    pub fn try_pop(&self) -> Result<T, TryPopError> {
        let mut state = self.lock();

        if state.count == 0 {
            return Err(if state.stopping {
                TryPopError::Stopped
            } else {
                TryPopError::Empty
            });
        }

        let value = state.read().ok_or(TryPopError::Empty)?;
        self.not_full.notify_one();
        Ok(value)
    }

    /// Stop the queue and wake every blocked producer and consumer
    ///
    /// Blocked producers give up and drop their value; consumers keep
    /// draining until the ring is empty. Calling this again only re-broadcasts.
    pub fn shutdown(&self) {
        let mut state = self.lock();

        if state.stopping {
            log::trace!("queue shutdown requested again; re-broadcasting");
        } else {
            state.stopping = true;
            log::debug!(
                "queue shutting down with {} of {} slot(s) occupied",
                state.count,
                state.capacity()
            );
        }

        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    pub fn is_stopping(&self) -> bool {
        self.lock().stopping
    }

    pub fn stats(&self) -> QueueStats {
        self.lock().stats
    }

    /// Capture occupancy, flag and counters in one critical section
    pub fn snapshot(&self) -> QueueSnapshot {
        self.lock().snapshot()
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("BoundedQueue")
            .field("capacity", &snapshot.capacity)
            .field("len", &snapshot.len)
            .field("stopping", &snapshot.stopping)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_rejected() {
        match BoundedQueue::<u32>::new(0) {
            Err(QueueError::InvalidCapacity { capacity }) => assert_eq!(capacity, 0),
            other => panic!("Expected InvalidCapacity error, got {:?}", other),
        }
    }

    #[test]
    fn test_cursors_wrap_around() {
        let queue = BoundedQueue::new(3).unwrap();

        for round in 0..5u32 {
            for i in 0..3 {
                assert_eq!(queue.push(round * 10 + i), PushOutcome::Accepted);
            }
            assert!(queue.is_full());
            for i in 0..3 {
                assert_eq!(queue.pop(), Some(round * 10 + i));
            }
            assert!(queue.is_empty());
        }

        let state = queue.lock();
        assert_eq!(state.head, 15 % 3);
        assert_eq!(state.tail, 15 % 3);
        assert!(state.slots.iter().all(Option::is_none));
    }

    #[test]
    fn test_count_matches_cursor_distance() {
        let queue = BoundedQueue::new(4).unwrap();

        for i in 0..6 {
            queue.push(i);
            if i % 2 == 1 {
                queue.pop();
            }
            let state = queue.lock();
            let distance = (state.head + state.capacity() - state.tail) % state.capacity();
            if state.is_full() {
                assert_eq!(state.head, state.tail);
            } else {
                assert_eq!(distance, state.count);
            }
        }
    }

    #[test]
    fn test_debug_does_not_require_debug_items() {
        struct Opaque;
        let queue = BoundedQueue::new(2).unwrap();
        queue.push(Opaque);

        let rendered = format!("{:?}", queue);
        assert!(rendered.contains("capacity: 2"));
        assert!(rendered.contains("len: 1"));
        assert!(rendered.contains("stopping: false"));
    }
}

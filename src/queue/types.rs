//! Type definitions for the queue system
//!
//! Outcome and statistics types shared by the ring queue and its callers.

use serde::Serialize;

/// Result of a blocking [`push`](crate::queue::BoundedQueue::push)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushOutcome {
    /// The value was written into the ring
    Accepted,
    /// The queue was shut down before the value could be written; it is gone
    Dropped,
}

impl PushOutcome {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Lifetime counters of a queue
///
/// `produced` and `consumed` only count values that actually passed through
/// the ring, so `produced - consumed` is always the current occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Values written into the ring
    pub produced: u64,
    /// Values read out of the ring
    pub consumed: u64,
    /// Values lost because the queue stopped before they were written
    pub dropped: u64,
    /// Times a producer suspended on a full ring
    pub wait_on_full: u64,
    /// Times a consumer suspended on an empty ring
    pub wait_on_empty: u64,
}

impl QueueStats {
    /// Values currently sitting in the ring according to the counters
    pub fn in_flight(&self) -> u64 {
        self.produced - self.consumed
    }
}

/// Consistent view of the queue taken under its lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    pub capacity: usize,
    pub len: usize,
    pub stopping: bool,
    pub stats: QueueStats,
}

impl QueueSnapshot {
    /// Whether the occupancy bound and counter invariants hold for this view
    pub fn is_consistent(&self) -> bool {
        self.len <= self.capacity && self.stats.in_flight() == self.len as u64
    }
}

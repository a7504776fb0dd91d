//! Queue Error Types

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid queue capacity: {capacity} (must be at least 1)")]
    InvalidCapacity { capacity: usize },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error returned by [`BoundedQueue::try_push`](crate::queue::BoundedQueue::try_push).
///
/// The rejected value is handed back to the caller in either variant.
#[derive(PartialEq, Eq)]
pub enum TryPushError<T> {
    /// Every slot is occupied
    Full(T),
    /// The queue has been shut down
    Stopped(T),
}

impl<T> TryPushError<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(value) | Self::Stopped(value) => value,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

impl<T> fmt::Debug for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
            Self::Stopped(_) => f.write_str("Stopped(..)"),
        }
    }
}

impl<T> fmt::Display for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("queue is full"),
            Self::Stopped(_) => f.write_str("queue is shutting down"),
        }
    }
}

impl<T> std::error::Error for TryPushError<T> {}

/// Error returned by [`BoundedQueue::try_pop`](crate::queue::BoundedQueue::try_pop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TryPopError {
    #[error("queue is empty")]
    Empty,
    /// Shut down and fully drained; no value will ever arrive
    #[error("queue is shut down and drained")]
    Stopped,
}

//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::queue::ring::BoundedQueue;

// Outcomes and statistics
pub use crate::queue::types::{PushOutcome, QueueSnapshot, QueueStats};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult, TryPopError, TryPushError};

//! Bounded Ring Queue Component
//!
//! A fixed-capacity, blocking, multi-producer/multi-consumer FIFO queue used to
//! decouple producer and consumer rates without unbounded memory growth.
//!
//! # Overview
//!
//! - **Backpressure**: `push` suspends while every slot is occupied
//! - **Blocking reads**: `pop` suspends while the ring is empty
//! - **Graceful shutdown**: `shutdown` sets a one-way flag and wakes all waiters
//! - **Drain on stop**: consumers keep receiving queued values after shutdown,
//!   then observe end-of-stream
//! - **Observable loss**: a producer that was still blocked at shutdown gets
//!   `PushOutcome::Dropped` and the `dropped` counter is incremented
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  push   ┌──────────────────────────────────┐   pop   ┌────────────┐
//! │ Producer A │ ──────▶ │          BoundedQueue<T>         │ ──────▶ │ Consumer A │
//! └────────────┘         │  ┌───┬───┬───┬───┬───┬───┬───┐   │         └────────────┘
//! ┌────────────┐  push   │  │ 5 │ 6 │   │   │ 2 │ 3 │ 4 │   │   pop   ┌────────────┐
//! │ Producer B │ ──────▶ │  └───┴───┴───┴───┴───┴───┴───┘   │ ──────▶ │ Consumer B │
//! └────────────┘         │        ▲head       ▲tail         │         └────────────┘
//!   waits on not_full    │  Mutex<RingState> + 2 Condvars   │   waits on not_empty
//!                        └──────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use ringq::queue::{BoundedQueue, PushOutcome};
//!
//! let queue = BoundedQueue::new(2).unwrap();
//! assert_eq!(queue.push("a"), PushOutcome::Accepted);
//! assert_eq!(queue.push("b"), PushOutcome::Accepted);
//! assert!(queue.try_push("c").is_err());
//!
//! queue.shutdown();
//! assert_eq!(queue.push("d"), PushOutcome::Dropped);
//! assert_eq!(queue.pop(), Some("a"));
//! assert_eq!(queue.pop(), Some("b"));
//! assert_eq!(queue.pop(), None);
//! assert_eq!(queue.stats().dropped, 1);
//! ```

pub mod api;
mod error;
mod ring;
mod types;

pub use error::{QueueError, QueueResult, TryPopError, TryPushError};
pub use ring::BoundedQueue;
pub use types::{PushOutcome, QueueSnapshot, QueueStats};

#[cfg(test)]
mod tests;

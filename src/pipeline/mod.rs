//! Producer/Consumer Run Driver
//!
//! Runs a set of producer and consumer tasks over one shared
//! [`BoundedQueue`](crate::queue::BoundedQueue) and reports what happened.
//!
//! # Lifecycle
//!
//! ```text
//!  spawn producers ─┐
//!  spawn consumers ─┼─▶ join producers ─▶ grace ─▶ shutdown() ─▶ join consumers ─▶ RunReport
//!                   │                                 │
//!  Interrupt ───────┴──────── (early shutdown) ───────┘
//! ```
//!
//! Every item that made it into the queue before `shutdown()` is still
//! delivered, because consumers drain the ring before they observe
//! end-of-stream. Only pushes that were blocked on a full ring (or issued
//! after shutdown) are lost, and those are counted as dropped.

pub mod api;
mod config;
mod coordinator;
mod durations;
mod error;
mod item;
mod report;
mod summary;
mod task;
mod verify;

pub use config::RunConfig;
pub use coordinator::{Interrupt, ShutdownCoordinator};
pub use error::{PipelineError, PipelineResult};
pub use item::Item;
pub use report::RunReport;
pub use summary::{BenchSummary, Spread};
pub use task::{
    ConsumerConfig, ConsumerReport, ProducerConfig, ProducerReport, TaskReport, TaskSpec,
    WorkSimulation,
};
pub use verify::Verification;

#[cfg(test)]
mod tests;

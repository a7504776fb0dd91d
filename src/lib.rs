//! Bounded multi-producer/multi-consumer ring queue and the harness that
//! stress-tests it.
//!
//! - [`queue`]: the blocking FIFO with broadcast shutdown
//! - [`pipeline`]: producer and consumer tasks driven by a shutdown coordinator
//! - [`app`]: command-line front end
//! - [`core`]: logging, signal handling and build metadata

pub mod app;
pub mod core;
pub mod pipeline;
pub mod queue;

//! Public API for the run driver

pub use crate::pipeline::config::RunConfig;
pub use crate::pipeline::coordinator::{Interrupt, ShutdownCoordinator};
pub use crate::pipeline::item::Item;
pub use crate::pipeline::report::RunReport;
pub use crate::pipeline::summary::{BenchSummary, Spread};
pub use crate::pipeline::task::{
    ConsumerConfig, ConsumerReport, ProducerConfig, ProducerReport, TaskReport, TaskSpec,
    WorkSimulation,
};
pub use crate::pipeline::verify::Verification;

// Error handling
pub use crate::pipeline::error::{PipelineError, PipelineResult};

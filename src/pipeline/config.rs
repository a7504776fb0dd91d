//! Run configuration for the producer/consumer driver

use crate::pipeline::durations;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::task::{ConsumerConfig, ProducerConfig, TaskSpec, WorkSimulation};
use serde::Serialize;
use std::time::Duration;

/// Everything a single run needs, fixed before any task starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub capacity: usize,
    pub producers: usize,
    pub consumers: usize,
    pub items_per_producer: u64,
    /// Pause between the last producer finishing and shutdown
    #[serde(rename = "grace_ms", serialize_with = "durations::as_millis")]
    pub grace: Duration,
    /// Keep consumed items so delivery can be verified afterwards
    pub record_items: bool,
    pub work: Option<WorkSimulation>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            producers: 2,
            consumers: 2,
            items_per_producer: 100_000,
            grace: Duration::from_secs(1),
            record_items: false,
            work: Some(WorkSimulation::new(10_000, Duration::from_micros(1))),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        if self.capacity == 0 {
            return Err(PipelineError::InvalidConfig {
                message: "capacity must be at least 1".to_string(),
            });
        }
        if self.producers == 0 {
            return Err(PipelineError::InvalidConfig {
                message: "at least one producer is required".to_string(),
            });
        }
        if self.consumers == 0 {
            // Nothing would ever drain the queue
            return Err(PipelineError::InvalidConfig {
                message: "at least one consumer is required".to_string(),
            });
        }
        Ok(())
    }

    /// Total number of items offered across all producers
    pub fn total_items(&self) -> u64 {
        self.items_per_producer * self.producers as u64
    }

    pub(crate) fn producer_specs(&self) -> Vec<TaskSpec> {
        (0..self.producers)
            .map(|id| {
                TaskSpec::Producer(ProducerConfig {
                    id,
                    items: self.items_per_producer,
                    work: self.work,
                })
            })
            .collect()
    }

    pub(crate) fn consumer_specs(&self) -> Vec<TaskSpec> {
        (0..self.consumers)
            .map(|id| {
                TaskSpec::Consumer(ConsumerConfig {
                    id,
                    record: self.record_items,
                    work: self.work,
                })
            })
            .collect()
    }
}

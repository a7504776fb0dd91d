//! Producer and consumer tasks
//!
//! Each task is described by a typed configuration built before its thread
//! starts. [`TaskSpec`] is the closed set of task kinds the coordinator can
//! run; it is dispatched with a plain `match`.

use crate::pipeline::durations;
use crate::pipeline::item::Item;
use crate::queue::{BoundedQueue, PushOutcome};
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Periodic pause standing in for per-item work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkSimulation {
    /// Pause after every `every` items
    pub every: u64,
    #[serde(rename = "pause_us", serialize_with = "durations::as_micros")]
    pub pause: Duration,
}

impl WorkSimulation {
    pub fn new(every: u64, pause: Duration) -> Self {
        Self { every, pause }
    }

    /// Sleep if `done` items completes another period
    fn after(&self, done: u64) {
        if self.every > 0 && done % self.every == 0 {
            thread::sleep(self.pause);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConfig {
    pub id: usize,
    /// Number of items to offer
    pub items: u64,
    pub work: Option<WorkSimulation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub id: usize,
    /// Keep every received item for later verification
    pub record: bool,
    pub work: Option<WorkSimulation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerReport {
    pub id: usize,
    pub offered: u64,
    pub accepted: u64,
    pub dropped: u64,
    #[serde(rename = "elapsed_secs", serialize_with = "durations::as_secs_f64")]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerReport {
    pub id: usize,
    pub consumed: u64,
    /// Items in the order this consumer received them, if recording was on
    #[serde(skip)]
    pub received: Option<Vec<Item>>,
    #[serde(rename = "elapsed_secs", serialize_with = "durations::as_secs_f64")]
    pub elapsed: Duration,
}

/// A task ready to be started on its own thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSpec {
    Producer(ProducerConfig),
    Consumer(ConsumerConfig),
}

/// What a finished task hands back to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum TaskReport {
    Producer(ProducerReport),
    Consumer(ConsumerReport),
}

impl TaskSpec {
    /// Thread name for this task
    pub fn name(&self) -> String {
        match self {
            Self::Producer(config) => format!("producer-{}", config.id),
            Self::Consumer(config) => format!("consumer-{}", config.id),
        }
    }

    /// Run to completion against `queue`, blocking the calling thread
    pub fn run(self, queue: Arc<BoundedQueue<Item>>) -> TaskReport {
        match self {
            Self::Producer(config) => TaskReport::Producer(run_producer(config, &queue)),
            Self::Consumer(config) => TaskReport::Consumer(run_consumer(config, &queue)),
        }
    }
}

/// Offer `config.items` items in sequence order
///
/// Every push returns, accepted or dropped; once the queue stops all
/// remaining items of this producer are dropped as well.
fn run_producer(config: ProducerConfig, queue: &BoundedQueue<Item>) -> ProducerReport {
    log::debug!("producer {} starting: {} item(s)", config.id, config.items);
    let start = Instant::now();
    let mut accepted = 0;
    let mut dropped = 0;

    for seq in 0..config.items {
        match queue.push(Item::new(config.id, seq)) {
            PushOutcome::Accepted => {
                accepted += 1;
                if let Some(work) = &config.work {
                    work.after(seq + 1);
                }
            }
            // Nothing left to work for once the queue has stopped
            PushOutcome::Dropped => dropped += 1,
        }
    }

    let elapsed = start.elapsed();
    if dropped > 0 {
        log::warn!(
            "producer {} lost {} item(s) to shutdown",
            config.id,
            dropped
        );
    }
    log::debug!(
        "producer {} finished: {} accepted in {:.4}s",
        config.id,
        accepted,
        elapsed.as_secs_f64()
    );

    ProducerReport {
        id: config.id,
        offered: config.items,
        accepted,
        dropped,
        elapsed,
    }
}

/// Drain the queue until end-of-stream
fn run_consumer(config: ConsumerConfig, queue: &BoundedQueue<Item>) -> ConsumerReport {
    log::debug!("consumer {} starting", config.id);
    let start = Instant::now();
    let mut consumed = 0;
    let mut received = config.record.then(Vec::new);

    while let Some(item) = queue.pop() {
        consumed += 1;
        if let Some(received) = received.as_mut() {
            received.push(item);
        }
        if let Some(work) = &config.work {
            work.after(consumed);
        }
    }

    let elapsed = start.elapsed();
    log::debug!(
        "consumer {} finished: {} consumed in {:.4}s",
        config.id,
        consumed,
        elapsed.as_secs_f64()
    );

    ConsumerReport {
        id: config.id,
        consumed,
        received,
        elapsed,
    }
}

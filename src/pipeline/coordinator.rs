//! Run lifecycle: spawn, drain, shut down, collect
//!
//! The coordinator is the only component that shuts the queue down during a
//! normal run. An [`Interrupt`] lets an outside party (the CLI's Ctrl-C
//! handler) stop the queue early; because shutdown is idempotent the
//! coordinator's own call afterwards is harmless.

use crate::pipeline::config::RunConfig;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::item::Item;
use crate::pipeline::report::RunReport;
use crate::pipeline::task::{ConsumerReport, ProducerReport, TaskReport, TaskSpec};
use crate::pipeline::verify::Verification;
use crate::queue::BoundedQueue;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

type TaskHandle = (String, JoinHandle<TaskReport>);

/// Cloneable handle that stops a run's queue from another thread
#[derive(Debug, Clone)]
pub struct Interrupt {
    queue: Arc<BoundedQueue<Item>>,
}

impl Interrupt {
    pub fn trigger(&self) {
        log::warn!("run interrupted; shutting the queue down early");
        self.queue.shutdown();
    }

    pub fn is_triggered(&self) -> bool {
        self.queue.is_stopping()
    }
}

/// Drives one run of producers and consumers over a shared queue
///
/// # Example
///
/// ```rust
/// use ringq::pipeline::{RunConfig, ShutdownCoordinator};
/// use std::time::Duration;
///
/// let config = RunConfig {
///     capacity: 8,
///     items_per_producer: 1_000,
///     grace: Duration::ZERO,
///     record_items: true,
///     work: None,
///     ..RunConfig::default()
/// };
///
/// let report = ShutdownCoordinator::new(config).unwrap().run().unwrap();
/// assert!(report.is_lossless());
/// assert_eq!(report.stats.consumed, 2_000);
/// ```
#[derive(Debug)]
pub struct ShutdownCoordinator {
    config: RunConfig,
    queue: Arc<BoundedQueue<Item>>,
}

impl ShutdownCoordinator {
    pub fn new(config: RunConfig) -> PipelineResult<Self> {
        config.validate()?;
        let queue = Arc::new(BoundedQueue::new(config.capacity)?);
        Ok(Self { config, queue })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn interrupt_handle(&self) -> Interrupt {
        Interrupt {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Execute the run and block until every task has terminated
    ///
    /// Order: start producers, start consumers, join producers, wait the
    /// grace interval, shut the queue down once, join consumers.
    pub fn run(self) -> PipelineResult<RunReport> {
        let started_at = chrono::Local::now().to_rfc3339();
        let start = Instant::now();
        log::info!(
            "starting run: {} producer(s) x {} item(s), {} consumer(s), capacity {}",
            self.config.producers,
            self.config.items_per_producer,
            self.config.consumers,
            self.config.capacity
        );

        let mut producers = self.spawn_all(self.config.producer_specs(), &mut Vec::new())?;
        let consumers = self.spawn_all(self.config.consumer_specs(), &mut producers)?;

        let producer_reports = match join_all(producers) {
            Ok(reports) => reports,
            Err(err) => {
                self.queue.shutdown();
                let _ = join_all(consumers);
                return Err(err);
            }
        };
        log::info!("all producers finished after {:.4}s", start.elapsed().as_secs_f64());

        if !self.config.grace.is_zero() && !self.queue.is_stopping() {
            log::info!(
                "waiting {}ms for consumers to catch up ({} item(s) queued)",
                self.config.grace.as_millis(),
                self.queue.len()
            );
            thread::sleep(self.config.grace);
        }

        self.queue.shutdown();
        let consumer_reports = join_all(consumers)?;
        let elapsed = start.elapsed();

        let producers: Vec<ProducerReport> = producer_reports
            .into_iter()
            .filter_map(|report| match report {
                TaskReport::Producer(report) => Some(report),
                TaskReport::Consumer(_) => None,
            })
            .collect();
        let consumers: Vec<ConsumerReport> = consumer_reports
            .into_iter()
            .filter_map(|report| match report {
                TaskReport::Consumer(report) => Some(report),
                TaskReport::Producer(_) => None,
            })
            .collect();

        let verification = if self.config.record_items {
            Verification::compute(&producers, &consumers)
        } else {
            None
        };

        let snapshot = self.queue.snapshot();
        let report = RunReport {
            started_at,
            config: self.config,
            elapsed,
            stats: snapshot.stats,
            remaining: snapshot.len,
            producers,
            consumers,
            verification,
        };

        log::info!(
            "run finished in {:.4}s: {} consumed, {} dropped, {:.0} items/s",
            elapsed.as_secs_f64(),
            report.stats.consumed,
            report.stats.dropped,
            report.throughput()
        );
        Ok(report)
    }

    /// Start every task in `specs`
    ///
    /// If a thread cannot be created the queue is shut down so that the
    /// tasks already started here and in `running` terminate, and all of
    /// them are joined before returning.
    fn spawn_all(
        &self,
        specs: Vec<TaskSpec>,
        running: &mut Vec<TaskHandle>,
    ) -> PipelineResult<Vec<TaskHandle>> {
        let mut handles = Vec::with_capacity(specs.len());
        for spec in specs {
            let name = spec.name();
            let queue = Arc::clone(&self.queue);
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn(move || spec.run(queue));

            match spawned {
                Ok(handle) => handles.push((name, handle)),
                Err(source) => {
                    log::error!("failed to spawn {}: {}", name, source);
                    self.queue.shutdown();
                    let _ = join_all(handles);
                    let _ = join_all(std::mem::take(running));
                    return Err(PipelineError::Spawn { task: name, source });
                }
            }
        }
        Ok(handles)
    }
}

/// Join every handle, reporting the first task that panicked
fn join_all(handles: Vec<TaskHandle>) -> PipelineResult<Vec<TaskReport>> {
    let mut reports = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for (name, handle) in handles {
        match handle.join() {
            Ok(report) => reports.push(report),
            Err(_) => {
                log::error!("task {} panicked", name);
                first_error.get_or_insert(PipelineError::TaskPanicked { task: name });
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(reports),
    }
}

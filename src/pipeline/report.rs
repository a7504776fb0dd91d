//! Results of a completed run

use crate::pipeline::config::RunConfig;
use crate::pipeline::durations;
use crate::pipeline::task::{ConsumerReport, ProducerReport};
use crate::pipeline::verify::Verification;
use crate::queue::QueueStats;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Local wall-clock start time (RFC 3339)
    pub started_at: String,
    pub config: RunConfig,
    #[serde(rename = "elapsed_secs", serialize_with = "durations::as_secs_f64")]
    pub elapsed: Duration,
    pub stats: QueueStats,
    /// Items still in the ring after every consumer stopped
    pub remaining: usize,
    pub producers: Vec<ProducerReport>,
    pub consumers: Vec<ConsumerReport>,
    pub verification: Option<Verification>,
}

impl RunReport {
    /// Consumed items per second of total run time
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.stats.consumed as f64 / secs
        } else {
            0.0
        }
    }

    /// Items offered but never consumed: dropped at shutdown or left behind
    pub fn lost(&self) -> u64 {
        self.stats.dropped + self.stats.in_flight()
    }

    /// Everything that entered the ring came out of it
    pub fn is_correct(&self) -> bool {
        self.stats.consumed == self.stats.produced && self.remaining == 0
    }

    /// Correct, nothing was dropped, and recorded deliveries (if any) verified
    pub fn is_lossless(&self) -> bool {
        self.is_correct()
            && self.stats.dropped == 0
            && self.verification.as_ref().map_or(true, Verification::is_clean)
    }
}

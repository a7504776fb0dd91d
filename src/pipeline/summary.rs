//! Aggregate statistics over repeated runs

use crate::pipeline::durations;
use crate::pipeline::report::RunReport;
use serde::Serialize;
use std::time::Duration;

/// Spread of a sample of measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Spread {
    pub min: f64,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub stddev: f64,
}

impl Spread {
    /// `None` for an empty sample
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        // Sample standard deviation; a single run has no spread
        let stddev = if n > 1 {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        Some(Self {
            min: sorted[0],
            mean,
            median,
            max: sorted[n - 1],
            stddev,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchSummary {
    pub runs: usize,
    pub correct_runs: usize,
    pub lossless_runs: usize,
    /// Items per second
    pub throughput: Spread,
    #[serde(rename = "mean_elapsed_secs", serialize_with = "durations::as_secs_f64")]
    pub mean_elapsed: Duration,
    pub total_dropped: u64,
    pub total_wait_on_full: u64,
    pub total_wait_on_empty: u64,
}

impl BenchSummary {
    pub fn from_reports(reports: &[RunReport]) -> Option<Self> {
        let throughputs: Vec<f64> = reports.iter().map(RunReport::throughput).collect();
        let throughput = Spread::of(&throughputs)?;
        let total_elapsed: Duration = reports.iter().map(|r| r.elapsed).sum();

        Some(Self {
            runs: reports.len(),
            correct_runs: reports.iter().filter(|r| r.is_correct()).count(),
            lossless_runs: reports.iter().filter(|r| r.is_lossless()).count(),
            throughput,
            mean_elapsed: total_elapsed / reports.len() as u32,
            total_dropped: reports.iter().map(|r| r.stats.dropped).sum(),
            total_wait_on_full: reports.iter().map(|r| r.stats.wait_on_full).sum(),
            total_wait_on_empty: reports.iter().map(|r| r.stats.wait_on_empty).sum(),
        })
    }
}

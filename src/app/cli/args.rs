//! Command-line arguments and their resolution into a run configuration
//!
//! Every tunable is an `Option` so that a config file can fill in whatever the
//! command line left unset; defaults are applied last, in [`Args::run_config`].

use crate::app::cli::error::{ConfigError, ConfigResult};
use crate::app::output::ReportFormat;
use crate::core::logging::level_for_verbosity;
use crate::core::version::LONG_VERSION;
use crate::pipeline::{RunConfig, WorkSimulation};
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ringq")]
#[command(about = "Stress test and benchmark for a bounded multi-producer/multi-consumer queue")]
#[command(version, long_version = LONG_VERSION)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Queue capacity in slots [default: 1024]
    #[arg(short = 'n', long = "capacity", value_name = "SLOTS")]
    pub capacity: Option<usize>,

    /// Number of producer threads [default: 2]
    #[arg(short = 'P', long = "producers", value_name = "COUNT")]
    pub producers: Option<usize>,

    /// Number of consumer threads [default: 2]
    #[arg(short = 'C', long = "consumers", value_name = "COUNT")]
    pub consumers: Option<usize>,

    /// Items offered by each producer [default: 100000]
    #[arg(short = 'i', long = "items", value_name = "COUNT")]
    pub items: Option<u64>,

    /// Pause between the producers finishing and shutdown [default: 1000]
    #[arg(short = 'g', long = "grace-ms", value_name = "MS")]
    pub grace_ms: Option<u64>,

    /// Repeat the run and summarise throughput [default: 1]
    #[arg(long = "runs", value_name = "COUNT")]
    pub runs: Option<usize>,

    /// Record consumed items and verify delivery after each run
    #[arg(long = "record", action = ArgAction::SetTrue)]
    pub record: bool,

    /// Simulated work: pause after every N items [default: 10000, 0 disables]
    #[arg(long = "work-every", value_name = "N")]
    pub work_every: Option<u64>,

    /// Simulated work: pause length in microseconds [default: 1]
    #[arg(long = "work-pause-us", value_name = "US")]
    pub work_pause_us: Option<u64>,

    /// Disable simulated work entirely
    #[arg(long = "no-work", action = ArgAction::SetTrue)]
    pub no_work: bool,

    /// Report format
    #[arg(short = 'o', long = "output", value_name = "FORMAT", value_parser = ["text", "json", "csv"])]
    pub output: Option<String>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease log verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Log level (overrides -v/-q)
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Build the run configuration, filling unset values with defaults
    pub fn run_config(&self) -> ConfigResult<RunConfig> {
        let defaults = RunConfig::default();

        let work = if self.no_work {
            None
        } else {
            let default_work = defaults
                .work
                .unwrap_or_else(|| WorkSimulation::new(10_000, Duration::from_micros(1)));
            match self.work_every.unwrap_or(default_work.every) {
                0 => None,
                every => Some(WorkSimulation::new(
                    every,
                    self.work_pause_us
                        .map(Duration::from_micros)
                        .unwrap_or(default_work.pause),
                )),
            }
        };

        let config = RunConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            producers: self.producers.unwrap_or(defaults.producers),
            consumers: self.consumers.unwrap_or(defaults.consumers),
            items_per_producer: self.items.unwrap_or(defaults.items_per_producer),
            grace: self
                .grace_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.grace),
            record_items: self.record || defaults.record_items,
            work,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn run_count(&self) -> ConfigResult<usize> {
        match self.runs.unwrap_or(1) {
            0 => Err(ConfigError::InvalidValue {
                key: "runs".to_string(),
                message: "at least one run is required".to_string(),
            }),
            runs => Ok(runs),
        }
    }

    pub fn report_format(&self) -> ConfigResult<ReportFormat> {
        match self.output.as_deref() {
            None => Ok(ReportFormat::default()),
            Some(name) => ReportFormat::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
                key: "output".to_string(),
                message: format!(
                    "unknown format '{}' (expected one of: {})",
                    name,
                    ReportFormat::names().join(", ")
                ),
            }),
        }
    }

    /// Whether to color output, falling back to TTY detection
    pub fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else {
            self.color || std::io::stdout().is_terminal()
        }
    }

    /// Explicit `--log-level`, else the level implied by `-v`/`-q`
    pub fn effective_log_level(&self) -> String {
        self.log_level.clone().unwrap_or_else(|| {
            let verbosity = (self.verbose as i8).saturating_sub(self.quiet as i8);
            level_for_verbosity(verbosity).to_string()
        })
    }

    /// Log file to write to; `none` and `-` disable file logging
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| !matches!(path.to_str(), Some("none") | Some("-")))
    }
}

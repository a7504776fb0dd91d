//! Application startup: configuration, logging, runtime, run loop, output
//!
//! Exit codes: 0 when every run delivered correctly, 1 for configuration or
//! runtime errors, 2 when a run lost items, 130 when interrupted.

use crate::app::cli::Args;
use crate::app::output::{self, ReportFormat};
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownSignal;
use crate::pipeline::{PipelineError, PipelineResult, RunConfig, RunReport, ShutdownCoordinator};
use clap::Parser;
use std::path::Path;

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_INCORRECT: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

/// Reports collected before the loop ended
#[derive(Debug)]
pub struct RunsOutcome {
    pub reports: Vec<RunReport>,
    pub interrupted: bool,
}

impl RunsOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            EXIT_INTERRUPTED
        } else if self.reports.iter().all(RunReport::is_correct) {
            EXIT_OK
        } else {
            EXIT_INCORRECT
        }
    }
}

/// Parse the command line and run the benchmark, returning the exit code
pub fn startup() -> i32 {
    let mut args = Args::parse();

    // Logging depends on the config file, so load errors go straight to stderr
    let config_path = match args.apply_config_file() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };

    let use_color = args.use_color();
    if let Err(e) = init_logging(
        Some(args.effective_log_level().as_str()),
        args.log_format.as_deref(),
        args.log_file_path().and_then(Path::to_str),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return EXIT_ERROR;
    }

    log::info!("{} starting", crate::core::version::long_version());
    match &config_path {
        Some(path) => log::debug!("loaded configuration from {}", path.display()),
        None => log::debug!("no configuration file loaded"),
    }

    let (config, runs, format) = match resolve(&args) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return EXIT_ERROR;
        }
    };

    let outcome = match runtime.block_on(execute_runs(config, runs)) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("run failed: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = output::render(
        &mut stdout,
        format,
        &outcome.reports,
        outcome.interrupted,
        use_color,
    ) {
        log::error!("failed to write report: {}", e);
        return EXIT_ERROR;
    }

    outcome.exit_code()
}

fn resolve(args: &Args) -> crate::app::cli::ConfigResult<(RunConfig, usize, ReportFormat)> {
    Ok((args.run_config()?, args.run_count()?, args.report_format()?))
}

/// Execute `runs` runs back to back, stopping early on a termination signal
///
/// Must be called from within a tokio runtime. Each run blocks a worker
/// thread via `spawn_blocking`; the signal only shuts the current queue
/// down, so an interrupted run still produces a report.
pub async fn execute_runs(config: RunConfig, runs: usize) -> PipelineResult<RunsOutcome> {
    let (signal, shutdown_rx) = ShutdownSignal::install();
    execute_runs_with(config, runs, signal, shutdown_rx).await
}

pub async fn execute_runs_with(
    config: RunConfig,
    runs: usize,
    signal: ShutdownSignal,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) -> PipelineResult<RunsOutcome> {
    let mut reports = Vec::with_capacity(runs);

    for run in 1..=runs {
        if signal.is_shutdown_requested() {
            log::warn!("skipping {} remaining run(s)", runs - run + 1);
            break;
        }
        log::info!("run {}/{}", run, runs);

        let coordinator = ShutdownCoordinator::new(config.clone())?;
        let interrupt = coordinator.interrupt_handle();
        let mut task = tokio::task::spawn_blocking(move || coordinator.run());

        let joined = tokio::select! {
            joined = &mut task => joined,
            _ = shutdown_rx.recv() => {
                interrupt.trigger();
                task.await
            }
        };

        let report = joined.map_err(|_| PipelineError::TaskPanicked {
            task: format!("run-{}", run),
        })??;
        reports.push(report);
    }

    Ok(RunsOutcome {
        reports,
        interrupted: signal.is_shutdown_requested(),
    })
}

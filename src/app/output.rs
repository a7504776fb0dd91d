//! Rendering of run reports and summaries
//!
//! Text output uses prettytable; JSON is a single document holding every run
//! and the summary; CSV emits one row per run.

use crate::pipeline::{BenchSummary, RunReport};
use colored::{Color, Colorize};
use prettytable::{format, row, Table};
use serde::Serialize;
use std::io::{self, Write};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(EnumIter, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|format| format.name().eq_ignore_ascii_case(name))
    }

    /// Names accepted on the command line and in config files
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|format| format.name()).collect()
    }
}

/// Run report plus the values derived from it, for serialization
#[derive(Serialize)]
struct RunView<'a> {
    run: usize,
    #[serde(flatten)]
    report: &'a RunReport,
    throughput: f64,
    lost: u64,
    correct: bool,
    lossless: bool,
}

impl<'a> RunView<'a> {
    fn new(run: usize, report: &'a RunReport) -> Self {
        Self {
            run,
            report,
            throughput: report.throughput(),
            lost: report.lost(),
            correct: report.is_correct(),
            lossless: report.is_lossless(),
        }
    }
}

#[derive(Serialize)]
struct Document<'a> {
    runs: Vec<RunView<'a>>,
    summary: Option<BenchSummary>,
    interrupted: bool,
}

pub fn render(
    w: &mut dyn Write,
    format: ReportFormat,
    reports: &[RunReport],
    interrupted: bool,
    color: bool,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => render_text(w, reports, interrupted, color),
        ReportFormat::Json => render_json(w, reports, interrupted),
        ReportFormat::Csv => render_csv(w, reports),
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn render_text(
    w: &mut dyn Write,
    reports: &[RunReport],
    interrupted: bool,
    color: bool,
) -> io::Result<()> {
    for (index, report) in reports.iter().enumerate() {
        render_run_text(w, index + 1, reports.len(), report, color)?;
    }

    if reports.len() > 1 {
        if let Some(summary) = BenchSummary::from_reports(reports) {
            render_summary_text(w, &summary, color)?;
        }
    }

    if interrupted {
        writeln!(
            w,
            "{}",
            paint("Interrupted: remaining runs were skipped", Color::Yellow, color)
        )?;
    }
    Ok(())
}

fn render_run_text(
    w: &mut dyn Write,
    run: usize,
    total: usize,
    report: &RunReport,
    color: bool,
) -> io::Result<()> {
    let config = &report.config;
    writeln!(
        w,
        "{}",
        paint(
            &format!("=== RUN {}/{} ({}) ===", run, total, report.started_at),
            Color::Cyan,
            color
        )
    )?;
    writeln!(
        w,
        "Configuration: {} producer(s), {} consumer(s), capacity {}, {} item(s) per producer (total {})",
        config.producers,
        config.consumers,
        config.capacity,
        config.items_per_producer,
        config.total_items()
    )?;

    let mut results = Table::new();
    results.set_format(*format::consts::FORMAT_CLEAN);
    results.add_row(row!["Total time", format!("{:.4} s", report.elapsed.as_secs_f64())]);
    results.add_row(row!["Produced", r->report.stats.produced]);
    results.add_row(row!["Consumed", r->report.stats.consumed]);
    results.add_row(row!["Dropped at shutdown", r->report.stats.dropped]);
    results.add_row(row!["Left in queue", r->report.remaining]);
    results.add_row(row!["Producers waited (full)", r->report.stats.wait_on_full]);
    results.add_row(row!["Consumers waited (empty)", r->report.stats.wait_on_empty]);
    if report.stats.consumed > 0 {
        results.add_row(row!["Throughput", format!("{:.0} items/s", report.throughput())]);
    }
    results.print(w)?;

    let mut tasks = Table::new();
    tasks.set_format(*format::consts::FORMAT_BOX_CHARS);
    tasks.set_titles(row!["Task", "Items", "Dropped", "Time (s)"]);
    for producer in &report.producers {
        tasks.add_row(row![
            format!("producer-{}", producer.id),
            r->producer.accepted,
            r->producer.dropped,
            r->format!("{:.4}", producer.elapsed.as_secs_f64())
        ]);
    }
    for consumer in &report.consumers {
        tasks.add_row(row![
            format!("consumer-{}", consumer.id),
            r->consumer.consumed,
            r->"-",
            r->format!("{:.4}", consumer.elapsed.as_secs_f64())
        ]);
    }
    tasks.print(w)?;

    if let Some(verification) = &report.verification {
        writeln!(
            w,
            "Verification: {} duplicate(s), {} missing, {} unexpected, {} order violation(s)",
            verification.duplicates,
            verification.missing,
            verification.unexpected,
            verification.order_violations
        )?;
    }

    let verdict = if report.is_lossless() {
        paint("CORRECT", Color::Green, color)
    } else if report.is_correct() {
        paint("CORRECT (with items dropped at shutdown)", Color::Yellow, color)
    } else {
        paint("ERROR - data loss", Color::Red, color)
    };
    writeln!(w, "Correctness: {}", verdict)?;
    writeln!(w)
}

fn render_summary_text(w: &mut dyn Write, summary: &BenchSummary, color: bool) -> io::Result<()> {
    writeln!(
        w,
        "{}",
        paint(&format!("=== SUMMARY ({} runs) ===", summary.runs), Color::Cyan, color)
    )?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.add_row(row!["Correct runs", r->format!("{}/{}", summary.correct_runs, summary.runs)]);
    table.add_row(row!["Lossless runs", r->format!("{}/{}", summary.lossless_runs, summary.runs)]);
    table.add_row(row!["Mean time", r->format!("{:.4} s", summary.mean_elapsed.as_secs_f64())]);
    table.add_row(row!["Throughput min", r->format!("{:.0}", summary.throughput.min)]);
    table.add_row(row!["Throughput mean", r->format!("{:.0}", summary.throughput.mean)]);
    table.add_row(row!["Throughput median", r->format!("{:.0}", summary.throughput.median)]);
    table.add_row(row!["Throughput max", r->format!("{:.0}", summary.throughput.max)]);
    table.add_row(row!["Throughput stddev", r->format!("{:.0}", summary.throughput.stddev)]);
    table.add_row(row!["Dropped (all runs)", r->summary.total_dropped]);
    table.print(w)?;
    writeln!(w)
}

fn render_json(w: &mut dyn Write, reports: &[RunReport], interrupted: bool) -> io::Result<()> {
    let document = Document {
        runs: reports
            .iter()
            .enumerate()
            .map(|(index, report)| RunView::new(index + 1, report))
            .collect(),
        summary: BenchSummary::from_reports(reports),
        interrupted,
    };
    serde_json::to_writer_pretty(&mut *w, &document)?;
    writeln!(w)
}

const CSV_HEADER: &str = "run,capacity,producers,consumers,items_per_producer,elapsed_secs,\
produced,consumed,dropped,remaining,wait_on_full,wait_on_empty,throughput,correct,lossless";

fn render_csv(w: &mut dyn Write, reports: &[RunReport]) -> io::Result<()> {
    writeln!(w, "{}", CSV_HEADER)?;
    for (index, report) in reports.iter().enumerate() {
        writeln!(
            w,
            "{},{},{},{},{},{:.6},{},{},{},{},{},{},{:.2},{},{}",
            index + 1,
            report.config.capacity,
            report.config.producers,
            report.config.consumers,
            report.config.items_per_producer,
            report.elapsed.as_secs_f64(),
            report.stats.produced,
            report.stats.consumed,
            report.stats.dropped,
            report.remaining,
            report.stats.wait_on_full,
            report.stats.wait_on_empty,
            report.throughput(),
            report.is_correct(),
            report.is_lossless()
        )?;
    }
    Ok(())
}

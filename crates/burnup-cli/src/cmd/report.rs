//! `burnup report <EXPORT>`: listings, burnup summary and chart data.
//!
//! Window and scope come from `burnup.toml` and/or flags; flags win.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use burnup_core::chart::ChartData;
use burnup_core::config::{ReportOverrides, load_report_config};
use burnup_core::report::BurnupReport;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::cards::CardListing;
use crate::output::{OutputMode, pretty_section, render};

/// Arguments for `burnup report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Board export (JSON).
    pub export: PathBuf,

    /// Write chart data (JSON) for the renderer to this path.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Config file (default: ./burnup.toml, then the user config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chart title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// First day of the reporting window (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the reporting window (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// First day of a break with no projected progress.
    #[arg(long)]
    pub break_start: Option<NaiveDate>,

    /// Last day of the break.
    #[arg(long)]
    pub break_end: Option<NaiveDate>,

    /// Total scope: points, or a `day,value[;day,value...]` schedule.
    #[arg(short, long, allow_hyphen_values = true)]
    pub scope: Option<String>,
}

impl ReportArgs {
    fn overrides(&self) -> ReportOverrides {
        ReportOverrides {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
            break_start: self.break_start,
            break_end: self.break_end,
            scope: self.scope.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    title: &'a str,
    #[serde(flatten)]
    cards: CardListing<'a>,
    report: &'a BurnupReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<&'a Path>,
}

/// Execute `burnup report`.
pub fn run_report(args: &ReportArgs, output: OutputMode, cwd: &Path) -> anyhow::Result<()> {
    let config = load_report_config(args.config.as_deref(), cwd)?;
    let resolved = config
        .resolve(&args.overrides())
        .context("resolving report settings")?;

    let replay = super::load_replay(&args.export)?;
    let report = BurnupReport::build(&replay.reportable(), &resolved.window, &resolved.scope);

    if let Some(path) = &args.out {
        ChartData::new(&resolved.title, &report).write_to(path)?;
    }
    info!(title = %resolved.title, "report ready");

    let value = ReportOutput {
        title: &resolved.title,
        cards: CardListing::from_replay(&replay),
        report: &report,
        chart: args.out.as_deref(),
    };
    render(output, &value, write_human)
}

fn write_human(value: &ReportOutput<'_>, mode: OutputMode, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_pretty() {
        pretty_section(w, value.title)?;
        writeln!(w)?;
    }
    value.cards.write_sections(w)?;

    if mode.is_pretty() {
        pretty_section(w, "Summary")?;
    }
    for line in value.report.summary.lines() {
        writeln!(w, "{line}")?;
    }

    if let Some(path) = value.chart {
        writeln!(w, "Wrote {}", path.display())?;
    }
    Ok(())
}

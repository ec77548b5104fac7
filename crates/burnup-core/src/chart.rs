//! Chart data handed to an external renderer.
//!
//! The renderer draws three lines (`actual`, `projected`, `scope`) with the
//! given title, axis labels and weekly x-ticks.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Classify, ErrorCode};
use crate::report::{BurnupReport, Point, ReportWindow, Summary};

pub const X_LABEL: &str = "Day";
pub const Y_LABEL: &str = "Story Points";
/// Spacing of x-axis ticks, in days.
pub const TICK_STEP: usize = 7;

#[derive(Debug, thiserror::Error)]
#[error("failed to write chart data to {}: {source}", .path.display())]
pub struct ChartWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl Classify for ChartWriteError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::OutputWriteFailed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries<'a> {
    pub actual: &'a [Point<i64>],
    pub projected: &'a [Point<f64>],
    pub scope: &'a [Point<i64>],
}

/// Everything the renderer needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData<'a> {
    pub title: &'a str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_ticks: Vec<i64>,
    pub window: &'a ReportWindow,
    pub series: ChartSeries<'a>,
    pub summary: &'a Summary,
}

impl<'a> ChartData<'a> {
    #[must_use]
    pub fn new(title: &'a str, report: &'a BurnupReport) -> Self {
        Self {
            title,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            x_ticks: (0..=report.window.end_day()).step_by(TICK_STEP).collect(),
            window: &report.window,
            series: ChartSeries {
                actual: &report.actual,
                projected: &report.projected,
                scope: &report.scope,
            },
            summary: &report.summary,
        }
    }

    /// Write as pretty JSON to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ChartWriteError`] if the file cannot be created or written.
    pub fn write_to(&self, path: &Path) -> Result<(), ChartWriteError> {
        let wrap = |source: std::io::Error| ChartWriteError {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(wrap)?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, self).map_err(|e| wrap(e.into()))?;
        writeln!(out).map_err(wrap)?;
        out.flush().map_err(wrap)?;

        info!(path = %path.display(), "wrote chart data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ScopeSpec;
    use chrono::NaiveDate;

    fn report() -> BurnupReport {
        let window = ReportWindow::new(
            NaiveDate::from_ymd_opt(2025, 9, 15).expect("date"),
            NaiveDate::from_ymd_opt(2025, 11, 26).expect("date"),
            None,
        )
        .expect("window");
        BurnupReport::build(&[], &window, &ScopeSpec::Fixed(20))
    }

    #[test]
    fn weekly_ticks_up_to_end() {
        let report = report();
        let chart = ChartData::new("Sprint", &report);
        assert_eq!(chart.x_ticks, [0, 7, 14, 21, 28, 35, 42, 49, 56, 63, 70]);
    }

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.json");
        let report = report();
        ChartData::new("Sprint", &report)
            .write_to(&path)
            .expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        let json: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(json["title"], "Sprint");
        assert_eq!(json["x_label"], "Day");
        assert_eq!(json["series"]["scope"][1]["day"], 72);
        assert_eq!(json["summary"]["total_scope"], 20);
    }

    #[test]
    fn unwritable_path_is_classified() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing-dir").join("chart.json");
        let report = report();
        let err = ChartData::new("Sprint", &report)
            .write_to(&path)
            .expect_err("no parent dir");
        assert_eq!(err.error_code(), ErrorCode::OutputWriteFailed);
        assert!(err.to_string().contains("chart.json"));
    }
}

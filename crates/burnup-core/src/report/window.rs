//! Reporting window and day indexing.
//!
//! Every timestamp is truncated to its UTC calendar date and expressed as a
//! whole-day offset from the window start (day 0).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{Classify, ErrorCode};

/// Errors from constructing a [`ReportWindow`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("window end {end} must be after window start {start}")]
    EndNotAfterStart { start: NaiveDate, end: NaiveDate },

    #[error("break end {end} is before break start {start}")]
    BreakInverted { start: NaiveDate, end: NaiveDate },

    #[error("break {start}..{end} lies outside the window {window_start}..{window_end}")]
    BreakOutsideWindow {
        start: NaiveDate,
        end: NaiveDate,
        window_start: NaiveDate,
        window_end: NaiveDate,
    },
}

impl Classify for WindowError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidWindow
    }
}

/// A date range in which no progress is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The calendar range a burnup report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(rename = "break", skip_serializing_if = "Option::is_none")]
    break_interval: Option<BreakInterval>,
}

impl ReportWindow {
    /// Validate and build a window.
    ///
    /// # Errors
    ///
    /// Returns a [`WindowError`] when `end` is not after `start`, or when the
    /// break is inverted or not contained in `[start, end]`.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        break_interval: Option<BreakInterval>,
    ) -> Result<Self, WindowError> {
        if end <= start {
            return Err(WindowError::EndNotAfterStart { start, end });
        }
        if let Some(b) = break_interval {
            if b.end < b.start {
                return Err(WindowError::BreakInverted {
                    start: b.start,
                    end: b.end,
                });
            }
            if b.start < start || b.end > end {
                return Err(WindowError::BreakOutsideWindow {
                    start: b.start,
                    end: b.end,
                    window_start: start,
                    window_end: end,
                });
            }
        }
        Ok(Self {
            start,
            end,
            break_interval,
        })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub const fn break_interval(&self) -> Option<BreakInterval> {
        self.break_interval
    }

    /// Day offset of a calendar date; negative before the window start.
    #[must_use]
    pub fn day_of_date(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Day offset of a timestamp, truncated to its UTC date.
    #[must_use]
    pub fn day_of(&self, time: DateTime<Utc>) -> i64 {
        self.day_of_date(time.date_naive())
    }

    /// Day offset of the window end. Always positive.
    #[must_use]
    pub fn end_day(&self) -> i64 {
        self.day_of_date(self.end)
    }

    /// `(break_start_day, break_end_day)` if a break is configured.
    #[must_use]
    pub fn break_days(&self) -> Option<(i64, i64)> {
        self.break_interval
            .map(|b| (self.day_of_date(b.start), self.day_of_date(b.end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn fall_window() -> ReportWindow {
        ReportWindow::new(
            date(2025, 9, 15),
            date(2025, 11, 26),
            Some(BreakInterval {
                start: date(2025, 10, 16),
                end: date(2025, 10, 19),
            }),
        )
        .expect("valid window")
    }

    #[test]
    fn day_offsets() {
        let window = fall_window();
        assert_eq!(window.end_day(), 72);
        assert_eq!(window.break_days(), Some((31, 34)));
        assert_eq!(window.day_of_date(date(2025, 9, 14)), -1);
    }

    #[test]
    fn timestamps_truncate_to_date() {
        let window = fall_window();
        let morning = Utc
            .with_ymd_and_hms(2025, 9, 20, 0, 0, 1)
            .single()
            .expect("ts");
        let night = Utc
            .with_ymd_and_hms(2025, 9, 20, 23, 59, 59)
            .single()
            .expect("ts");
        assert_eq!(window.day_of(morning), 5);
        assert_eq!(window.day_of(night), 5);
    }

    #[test]
    fn rejects_empty_window() {
        let err = ReportWindow::new(date(2025, 9, 15), date(2025, 9, 15), None)
            .expect_err("zero-length window");
        assert!(matches!(err, WindowError::EndNotAfterStart { .. }));
        assert_eq!(err.error_code(), ErrorCode::InvalidWindow);
    }

    #[test]
    fn rejects_inverted_break() {
        let err = ReportWindow::new(
            date(2025, 9, 1),
            date(2025, 9, 30),
            Some(BreakInterval {
                start: date(2025, 9, 20),
                end: date(2025, 9, 10),
            }),
        )
        .expect_err("inverted break");
        assert!(matches!(err, WindowError::BreakInverted { .. }));
    }

    #[test]
    fn rejects_break_outside_window() {
        let err = ReportWindow::new(
            date(2025, 9, 1),
            date(2025, 9, 30),
            Some(BreakInterval {
                start: date(2025, 9, 25),
                end: date(2025, 10, 2),
            }),
        )
        .expect_err("break past end");
        assert!(err.to_string().contains("outside the window"));
    }

    #[test]
    fn no_break() {
        let window =
            ReportWindow::new(date(2025, 9, 1), date(2025, 9, 11), None).expect("valid window");
        assert_eq!(window.break_days(), None);
        assert_eq!(window.end_day(), 10);
    }
}

//! Total scope: a fixed number or a schedule of scope changes.
//!
//! A schedule is written `day,value[;day,value...]`. `value` is an absolute
//! point count, or a signed delta (`+n` / `-n`) relative to the previous
//! entry. The last entry's scope is the total the projection aims for.
//!
//! ```text
//! 0,10;30,+5;60,20   →   day 0: 10, day 30: 15, day 60: 20
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::series::Point;
use crate::error::{Classify, ErrorCode};

/// Errors from parsing a scope value or schedule. Each names the fragment
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeParseError {
    #[error("scope schedule is empty")]
    Empty,

    #[error("scope schedule entry #{index} is empty")]
    EmptyEntry { index: usize },

    #[error("scope schedule entry '{fragment}' is missing a comma (expected day,value)")]
    MissingComma { fragment: String },

    #[error("scope schedule entry '{fragment}' has an invalid day")]
    InvalidDay { fragment: String },

    #[error("scope entry '{fragment}' has an invalid value")]
    InvalidValue { fragment: String },

    #[error("scope schedule entry '{fragment}' is relative but has no previous value")]
    RelativeWithoutBase { fragment: String },

    #[error("scope schedule entry '{fragment}' goes back in time")]
    DayOutOfOrder { fragment: String },

    #[error("scope entry '{fragment}' yields negative scope {scope}")]
    NegativeScope { fragment: String, scope: i64 },

    #[error("scope schedule entry '{fragment}' overflows the scope total")]
    Overflow { fragment: String },
}

impl Classify for ScopeParseError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidScopeSchedule
    }
}

/// One schedule entry: scope in effect from `day` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeChange {
    pub day: i64,
    pub scope: i64,
}

/// A parsed scope schedule. Never empty; days are non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScopeSchedule {
    changes: Vec<ScopeChange>,
}

impl ScopeSchedule {
    #[must_use]
    pub fn changes(&self) -> &[ScopeChange] {
        &self.changes
    }

    /// Day of the last entry.
    #[must_use]
    pub fn last_day(&self) -> i64 {
        self.changes.last().map_or(0, |c| c.day)
    }

    /// Scope of the last entry.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.changes.last().map_or(0, |c| c.scope)
    }

    /// Right-continuous step line for rendering.
    ///
    /// Each change after the first is drawn as a vertical jump (the point is
    /// duplicated with the previous and the new scope). The line is then
    /// extended flat to `end_day`, or to the last change day if that is later.
    #[must_use]
    pub fn step_line(&self, end_day: i64) -> Vec<Point<i64>> {
        let end_day = end_day.max(self.last_day());
        let mut line = Vec::with_capacity(self.changes.len() * 2 + 1);
        let mut previous: Option<i64> = None;
        for change in &self.changes {
            if let Some(prev) = previous {
                line.push(Point::new(change.day, prev));
            }
            line.push(Point::new(change.day, change.scope));
            previous = Some(change.scope);
        }
        let last = self.total();
        line.push(Point::new(end_day, last));
        line.dedup();
        line
    }
}

impl FromStr for ScopeSchedule {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ScopeParseError::Empty);
        }

        let mut changes: Vec<ScopeChange> = Vec::new();
        for (index, raw) in s.split(';').enumerate() {
            let fragment = raw.trim();
            if fragment.is_empty() {
                return Err(ScopeParseError::EmptyEntry { index });
            }
            let owned = || fragment.to_string();

            let (day, value) = fragment
                .split_once(',')
                .ok_or_else(|| ScopeParseError::MissingComma { fragment: owned() })?;
            let day: i64 = day
                .trim()
                .parse()
                .map_err(|_| ScopeParseError::InvalidDay { fragment: owned() })?;
            let value = value.trim();
            let amount: i64 = value
                .parse()
                .map_err(|_| ScopeParseError::InvalidValue { fragment: owned() })?;

            let previous = changes.last().copied();
            if previous.is_some_and(|p| day < p.day) {
                return Err(ScopeParseError::DayOutOfOrder { fragment: owned() });
            }

            let scope = if value.starts_with('+') || value.starts_with('-') {
                let base = previous
                    .ok_or_else(|| ScopeParseError::RelativeWithoutBase { fragment: owned() })?;
                base.scope
                    .checked_add(amount)
                    .ok_or_else(|| ScopeParseError::Overflow { fragment: owned() })?
            } else {
                amount
            };
            if scope < 0 {
                return Err(ScopeParseError::NegativeScope {
                    fragment: owned(),
                    scope,
                });
            }

            changes.push(ScopeChange { day, scope });
        }

        Ok(Self { changes })
    }
}

impl fmt::Display for ScopeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{},{}", change.day, change.scope)?;
        }
        Ok(())
    }
}

/// How total scope is specified for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeSpec {
    /// A constant scope for the whole window.
    Fixed(i64),
    /// Scope that changes on given days.
    Schedule(ScopeSchedule),
}

impl ScopeSpec {
    /// The scope the projection ends at.
    #[must_use]
    pub fn total(&self) -> i64 {
        match self {
            Self::Fixed(total) => *total,
            Self::Schedule(schedule) => schedule.total(),
        }
    }

    /// The scope reference line: a horizontal line for fixed scope, the
    /// schedule's step line otherwise.
    #[must_use]
    pub fn step_line(&self, end_day: i64) -> Vec<Point<i64>> {
        match self {
            Self::Fixed(total) => vec![Point::new(0, *total), Point::new(end_day, *total)],
            Self::Schedule(schedule) => schedule.step_line(end_day),
        }
    }
}

impl FromStr for ScopeSpec {
    type Err = ScopeParseError;

    /// A value containing `,` is a schedule; anything else a fixed scope.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            return s.parse().map(Self::Schedule);
        }
        let fragment = s.trim();
        if fragment.is_empty() {
            return Err(ScopeParseError::Empty);
        }
        let total: i64 = fragment.parse().map_err(|_| ScopeParseError::InvalidValue {
            fragment: fragment.to_string(),
        })?;
        if total < 0 {
            return Err(ScopeParseError::NegativeScope {
                fragment: fragment.to_string(),
                scope: total,
            });
        }
        Ok(Self::Fixed(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes(schedule: &ScopeSchedule) -> Vec<(i64, i64)> {
        schedule
            .changes()
            .iter()
            .map(|c| (c.day, c.scope))
            .collect()
    }

    #[test]
    fn parses_absolute_and_relative_entries() {
        let schedule: ScopeSchedule = "0,10;30,+5;60,20".parse().expect("parse");
        assert_eq!(scopes(&schedule), [(0, 10), (30, 15), (60, 20)]);
        assert_eq!(schedule.total(), 20);
    }

    #[test]
    fn negative_delta() {
        let schedule: ScopeSchedule = "0,40; 14,-8 ;21,+3".parse().expect("parse");
        assert_eq!(scopes(&schedule), [(0, 40), (14, 32), (21, 35)]);
    }

    #[test]
    fn single_entry() {
        let schedule: ScopeSchedule = "0,25".parse().expect("parse");
        assert_eq!(schedule.total(), 25);
    }

    #[test]
    fn missing_comma_names_fragment() {
        let err = "0,10;30:15".parse::<ScopeSchedule>().expect_err("bad");
        assert_eq!(
            err,
            ScopeParseError::MissingComma {
                fragment: "30:15".into()
            }
        );
        assert!(err.to_string().contains("'30:15'"));
        assert_eq!(err.error_code(), ErrorCode::InvalidScopeSchedule);
    }

    #[test]
    fn non_integer_value_names_fragment() {
        let err = "0,ten".parse::<ScopeSchedule>().expect_err("bad");
        assert_eq!(
            err,
            ScopeParseError::InvalidValue {
                fragment: "0,ten".into()
            }
        );
    }

    #[test]
    fn non_integer_day() {
        let err = "x,10".parse::<ScopeSchedule>().expect_err("bad");
        assert!(matches!(err, ScopeParseError::InvalidDay { .. }));
    }

    #[test]
    fn leading_relative_entry_is_rejected() {
        let err = "0,+10".parse::<ScopeSchedule>().expect_err("bad");
        assert!(matches!(err, ScopeParseError::RelativeWithoutBase { .. }));
    }

    #[test]
    fn trailing_separator_is_rejected() {
        let err = "0,10;".parse::<ScopeSchedule>().expect_err("bad");
        assert_eq!(err, ScopeParseError::EmptyEntry { index: 1 });
    }

    #[test]
    fn out_of_order_days_are_rejected() {
        let err = "10,5;3,6".parse::<ScopeSchedule>().expect_err("bad");
        assert!(matches!(err, ScopeParseError::DayOutOfOrder { .. }));
    }

    #[test]
    fn negative_scope_is_rejected() {
        let err = "0,3;5,-4".parse::<ScopeSchedule>().expect_err("bad");
        assert!(matches!(err, ScopeParseError::NegativeScope { scope: -1, .. }));
    }

    #[test]
    fn empty_schedule() {
        assert_eq!("".parse::<ScopeSchedule>(), Err(ScopeParseError::Empty));
        assert_eq!("  ".parse::<ScopeSpec>(), Err(ScopeParseError::Empty));
    }

    #[test]
    fn step_line_jumps_vertically_and_extends_to_end() {
        let schedule: ScopeSchedule = "0,10;30,+5;60,20".parse().expect("parse");
        let line: Vec<(i64, i64)> = schedule
            .step_line(72)
            .iter()
            .map(|p| (p.day, p.value))
            .collect();
        assert_eq!(
            line,
            [
                (0, 10),
                (30, 10),
                (30, 15),
                (60, 15),
                (60, 20),
                (72, 20),
            ]
        );
    }

    #[test]
    fn step_line_reaches_changes_after_end_day() {
        let schedule: ScopeSchedule = "0,10;80,20".parse().expect("parse");
        let line = schedule.step_line(72);
        assert_eq!(
            line,
            [Point::new(0, 10), Point::new(80, 10), Point::new(80, 20)]
        );
        assert!(line.windows(2).all(|w| w[0].day <= w[1].day));
    }

    #[test]
    fn huge_delta_is_an_overflow_error() {
        let err = "0,9223372036854775807;1,+1"
            .parse::<ScopeSchedule>()
            .expect_err("overflow");
        assert_eq!(
            err,
            ScopeParseError::Overflow {
                fragment: "1,+1".into()
            }
        );
        assert_eq!(err.error_code(), ErrorCode::InvalidScopeSchedule);
    }

    #[test]
    fn spec_parses_fixed_and_schedule() {
        assert_eq!("42".parse::<ScopeSpec>(), Ok(ScopeSpec::Fixed(42)));
        let spec: ScopeSpec = "0,10;5,+2".parse().expect("parse");
        assert_eq!(spec.total(), 12);
        assert!(matches!("-3".parse::<ScopeSpec>(), Err(ScopeParseError::NegativeScope { .. })));
        assert!(matches!("lots".parse::<ScopeSpec>(), Err(ScopeParseError::InvalidValue { .. })));
    }

    #[test]
    fn fixed_scope_line_is_horizontal() {
        let line = ScopeSpec::Fixed(30).step_line(40);
        assert_eq!(line, [Point::new(0, 30), Point::new(40, 30)]);
    }

    #[test]
    fn display_normalizes_to_absolute() {
        let schedule: ScopeSchedule = "0,10;30,+5".parse().expect("parse");
        assert_eq!(schedule.to_string(), "0,10;30,15");
    }
}

//! Projected target line.
//!
//! A straight line from `(0, 0)` to `(end_day, total_scope)` at slope
//! `total_scope / end_day`, frozen during the break:
//!
//! ```text
//! no break:   (0,0) ─────────────────────────────── (end, total)
//! break:      (0,0) ──── (bs, bs·k) ── (be, bs·k) ── (end, total)
//! ```
//!
//! After the break the line resumes at a steeper slope so that it still
//! reaches `total_scope` on `end_day`.

use serde::Serialize;

use super::series::Point;
use super::window::ReportWindow;

/// Piecewise-linear projection defined by its control points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    points: Vec<Point<f64>>,
}

impl Projection {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(window: &ReportWindow, total_scope: i64) -> Self {
        let end_day = window.end_day();
        let total = total_scope as f64;
        let slope = total / end_day as f64;

        let points = match window.break_days() {
            None => vec![Point::new(0, 0.0), Point::new(end_day, total)],
            Some((break_start, break_end)) => {
                let held = break_start as f64 * slope;
                vec![
                    Point::new(0, 0.0),
                    Point::new(break_start, held),
                    Point::new(break_end, held),
                    Point::new(end_day, total),
                ]
            }
        };

        Self { points }
    }

    /// Control points, x non-decreasing.
    #[must_use]
    pub fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    /// Projected value on `day`.
    ///
    /// Exact at control points; 0 before day 0 and the final value after
    /// the last control point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value_at(&self, day: i64) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if day <= first.day {
            return if day == first.day { first.value } else { 0.0 };
        }
        if day >= last.day {
            return last.value;
        }
        if let Some(hit) = self.points.iter().rev().find(|p| p.day == day) {
            return hit.value;
        }

        self.points
            .windows(2)
            .find(|pair| pair[0].day < day && day < pair[1].day)
            .map_or(last.value, |pair| {
                let (a, b) = (pair[0], pair[1]);
                let t = (day - a.day) as f64 / (b.day - a.day) as f64;
                (b.value - a.value).mul_add(t, a.value)
            })
    }
}

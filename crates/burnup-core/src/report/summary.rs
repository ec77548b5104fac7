//! Aggregate figures printed under the burnup listings.

use serde::Serialize;

use super::projection::Projection;
use super::series::Point;
use crate::model::card::Card;

/// Headline numbers for "where are we now".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Last x-coordinate of the actual series.
    pub current_day: i64,
    /// Completed points as of `current_day`.
    pub current_points: i64,
    /// Projected target on `current_day`.
    pub projected_now: f64,
    /// Points on cards that are neither completed nor closed.
    pub open_points: i64,
    pub total_scope: i64,
    /// Scope not yet on the board: `total - completed - open`. May be
    /// negative when the board holds more points than planned.
    pub unentered_points: i64,
}

impl Summary {
    #[must_use]
    pub fn compute(
        actual: &[Point<i64>],
        projection: &Projection,
        cards: &[Card],
        total_scope: i64,
    ) -> Self {
        let last = actual.last().copied().unwrap_or(Point::new(0, 0));
        let open_points: i64 = cards
            .iter()
            .filter(|c| !c.is_completed() && !c.closed)
            .map(|c| i64::from(c.story_points))
            .sum();

        Self {
            current_day: last.day,
            current_points: last.value,
            projected_now: projection.value_at(last.day),
            open_points,
            total_scope,
            unentered_points: total_scope - last.value - open_points,
        }
    }

    /// Console lines, in display order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Current day: {}", self.current_day),
            format!("Current points: {}", self.current_points),
            format!("Projected points for now: {}", self.projected_now as i64),
            format!("Total uncompleted points: {}", self.open_points),
            format!("Total scope: {}", self.total_scope),
            format!(
                "How many more points need to be created in trello: {}",
                self.unentered_points
            ),
        ]
    }
}

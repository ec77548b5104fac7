//! Burnup aggregation.
//!
//! Turns finalized card states into the series a burnup chart is drawn
//! from:
//!
//! - `actual`: cumulative completed points, a right-continuous step series
//!   ([`series`])
//! - `projected`: the break-adjusted target line ([`projection`])
//! - `scope`: the total-scope reference line ([`scope`])
//!
//! plus the [`Summary`] figures printed under the listings.

pub mod listing;
pub mod projection;
pub mod scope;
pub mod series;
pub mod summary;
pub mod window;

pub use projection::Projection;
pub use scope::{ScopeChange, ScopeParseError, ScopeSchedule, ScopeSpec};
pub use series::{Point, TimelineEvent, TimelineKind, cumulative_actual, event_stream};
pub use summary::Summary;
pub use window::{BreakInterval, ReportWindow, WindowError};

use serde::Serialize;
use tracing::info;

use crate::model::card::Card;

/// Everything needed to draw and describe one burnup chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnupReport {
    pub window: ReportWindow,
    pub actual: Vec<Point<i64>>,
    pub projected: Vec<Point<f64>>,
    pub scope: Vec<Point<i64>>,
    pub summary: Summary,
}

impl BurnupReport {
    /// Aggregate `cards` (normally [`crate::replay::Replay::reportable`])
    /// over `window`.
    ///
    /// An empty card list yields the empty report: actual `[(0, 0)]`.
    #[must_use]
    pub fn build(cards: &[Card], window: &ReportWindow, scope: &ScopeSpec) -> Self {
        let total_scope = scope.total();
        let events = event_stream(cards);
        let actual = cumulative_actual(window, &events);
        let projection = Projection::new(window, total_scope);
        let summary = Summary::compute(&actual, &projection, cards, total_scope);

        info!(
            cards = cards.len(),
            events = events.len(),
            current_day = summary.current_day,
            current_points = summary.current_points,
            total_scope,
            "built burnup report"
        );

        Self {
            window: *window,
            actual,
            projected: projection.points().to_vec(),
            scope: scope.step_line(window.end_day()),
            summary,
        }
    }
}

//! Event stream and cumulative "actual" series.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::window::ReportWindow;
use crate::model::card::Card;

/// One chart point: a day offset and a y-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point<T> {
    pub day: i64,
    pub value: T,
}

impl<T> Point<T> {
    pub const fn new(day: i64, value: T) -> Self {
        Self { day, value }
    }
}

/// What happened to a card at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Create,
    Complete,
}

/// A derived, read-only event referencing its card.
#[derive(Debug, Clone, Copy)]
pub struct TimelineEvent<'a> {
    pub time: DateTime<Utc>,
    pub kind: TimelineKind,
    pub card: &'a Card,
}

/// Emit a create event per card and a complete event per completed card,
/// stably sorted by timestamp.
#[must_use]
pub fn event_stream(cards: &[Card]) -> Vec<TimelineEvent<'_>> {
    let mut events: Vec<TimelineEvent<'_>> = cards
        .iter()
        .flat_map(|card| {
            let create = TimelineEvent {
                time: card.creation_time,
                kind: TimelineKind::Create,
                card,
            };
            let complete = card.completion_time.map(|time| TimelineEvent {
                time,
                kind: TimelineKind::Complete,
                card,
            });
            std::iter::once(create).chain(complete)
        })
        .collect();
    events.sort_by_key(|e| e.time);
    events
}

/// Fold completions into a right-continuous cumulative step series.
///
/// Starts at `(0, 0)`. Completions on the same day as the last point merge
/// into it; completions dated before the window start count on day 0.
#[must_use]
pub fn cumulative_actual(window: &ReportWindow, events: &[TimelineEvent<'_>]) -> Vec<Point<i64>> {
    let mut series = vec![Point::new(0, 0_i64)];
    let mut total = 0_i64;

    for event in events.iter().filter(|e| e.kind == TimelineKind::Complete) {
        total += i64::from(event.card.story_points);
        let day = window.day_of(event.time).max(0);
        match series.last_mut() {
            Some(last) if last.day == day => last.value = total,
            _ => series.push(Point::new(day, total)),
        }
    }

    series
}

//! Reconstructed card state.
//!
//! A [`Card`] is the per-item state the replay folds the action log into.
//! Each action's effect is a pure `Card -> Card` transition so the fold in
//! [`crate::replay`] stays a plain ordered reduction over a map keyed by
//! [`CardId`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::{CardRef, CardSnapshot};
use crate::model::label::LabelCatalog;

/// Substring (case-insensitive) that marks a list as a completion list.
pub const DONE_LIST_TOKEN: &str = "done";

/// Returns `true` if a list with this name counts as "done".
#[must_use]
pub fn is_done_list(list_name: &str) -> bool {
    list_name.to_lowercase().contains(DONE_LIST_TOKEN)
}

/// Opaque, stable board identifier of a card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// State of one board card after some prefix of the action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    /// Title; last update wins.
    pub name: String,
    /// Timestamp of the creation action. Never changes after creation.
    pub creation_time: DateTime<Utc>,
    /// Set by creation into a done list or by a move into one.
    pub completion_time: Option<DateTime<Utc>>,
    /// Resolved from label text; 0 when no label carries an estimate.
    pub story_points: u32,
    /// Archival flag; last update wins.
    pub closed: bool,
}

impl Card {
    /// Initial state for a card created at `time` into the list `list_name`.
    ///
    /// A card created straight into a done list is complete on creation.
    #[must_use]
    pub fn created(card: &CardRef, list_name: &str, time: DateTime<Utc>) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            creation_time: time,
            completion_time: is_done_list(list_name).then_some(time),
            story_points: 0,
            closed: false,
        }
    }

    /// Apply the metadata carried by an update action.
    ///
    /// `name` and `closed` always refresh. Story points are recomputed from
    /// scratch only when the snapshot carries label associations.
    #[must_use]
    pub fn with_update(self, snapshot: &CardSnapshot, labels: &LabelCatalog) -> Self {
        let story_points = snapshot
            .id_labels
            .as_deref()
            .map_or(self.story_points, |ids| labels.story_points(ids));
        Self {
            name: snapshot.name.clone(),
            closed: snapshot.closed,
            story_points,
            ..self
        }
    }

    /// Record a move into a done list at `time`.
    ///
    /// Returns the card unchanged together with `false` when `time` is
    /// earlier than an already recorded completion.
    #[must_use]
    pub fn with_completion(self, time: DateTime<Utc>) -> (Self, bool) {
        match self.completion_time {
            Some(current) if time < current => (self, false),
            _ => (
                Self {
                    completion_time: Some(time),
                    ..self
                },
                true,
            ),
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Counted by the burnup aggregation: open on the board and estimated.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        !self.closed && self.story_points > 0
    }
}

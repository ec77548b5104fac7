//! Action model for board action-log exports.
//!
//! An export stores its actions most-recent-first. Each action has an
//! envelope (`id`, `type`, `date`) and a `data` object whose shape depends
//! on `type`. Decoding is two-pass: [`ActionEnvelope`] captures the envelope
//! with an untyped payload, then [`ActionEnvelope::into_action`] decodes the
//! payload into a typed [`ActionKind`] and parses the timestamp. Only handled
//! kinds require a valid `date`.

pub mod data;
pub mod types;

pub use data::{
    ActionKind, CardRef, CardSnapshot, CreateCardData, DataParseError, ListRef, ListTransition,
    UpdateCardData,
};
pub use types::{ActionType, UnknownActionType};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// One decoded entry of the action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Export-assigned action id, when present.
    pub id: Option<String>,
    /// When the action happened. Always set for handled kinds; `None` for an
    /// ignored action whose date is missing or unreadable.
    pub date: Option<DateTime<Utc>>,
    /// Typed payload.
    pub kind: ActionKind,
}

/// First-pass view of an action: envelope fields plus the raw payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Errors from the second decoding pass.
#[derive(Debug, thiserror::Error)]
pub enum ActionDecodeError {
    /// The `date` field is not an RFC 3339 timestamp.
    #[error("invalid action date '{raw}': {source}")]
    BadDate {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A handled action has no `date`.
    #[error("{action_type} action has no date")]
    MissingDate { action_type: String },

    /// The payload does not match the schema for its type.
    #[error(transparent)]
    Payload(#[from] DataParseError),
}

impl ActionEnvelope {
    /// Parse the timestamp and decode the typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`ActionDecodeError::Payload`] for a malformed handled payload,
    /// and [`ActionDecodeError::BadDate`] / [`ActionDecodeError::MissingDate`]
    /// when a handled action has no usable `date`.
    pub fn into_action(self) -> Result<Action, ActionDecodeError> {
        let kind = ActionKind::deserialize_for(&self.action_type, self.data)?;
        let date = match (&kind, self.date) {
            (ActionKind::Ignored(_), raw) => raw.and_then(|raw| parse_date(&raw).ok()),
            (_, Some(raw)) => Some(parse_date(&raw)?),
            (_, None) => {
                return Err(ActionDecodeError::MissingDate {
                    action_type: self.action_type,
                });
            }
        };
        Ok(Action {
            id: self.id,
            date,
            kind,
        })
    }
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, ActionDecodeError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| ActionDecodeError::BadDate {
            raw: raw.to_string(),
            source,
        })
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.as_deref().unwrap_or("-");
        let date = self.date.map_or_else(|| "-".to_string(), |d| d.to_rfc3339());
        match &self.kind {
            ActionKind::CreateCard(d) => write!(
                f,
                "{date}\t{id}\tcreateCard\t{}\tcreate: {} in {}",
                d.card.id, d.card.name, d.list.name
            ),
            ActionKind::UpdateCard(d) => match &d.transition {
                Some(t) => write!(
                    f,
                    "{date}\t{id}\tupdateCard\t{}\tmove: {} -> {}",
                    d.card.id, t.before.name, t.after.name
                ),
                None => write!(
                    f,
                    "{date}\t{id}\tupdateCard\t{}\tupdate: {}",
                    d.card.id, d.card.name
                ),
            },
            ActionKind::Ignored(kind) => write!(f, "{date}\t{id}\t{kind}\t-\tignored"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Typed payloads for the handled action types.
//!
//! The discriminant lives on the action envelope, outside the `data`
//! object, so payloads are decoded in a second pass via
//! [`ActionKind::deserialize_for`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::ActionType;
use crate::model::card::{CardId, is_done_list};

// ---------------------------------------------------------------------------
// ActionKind — the unified payload enum
// ---------------------------------------------------------------------------

/// What an action does to card state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Payload for `createCard`.
    CreateCard(CreateCardData),
    /// Payload for `updateCard`.
    UpdateCard(UpdateCardData),
    /// Any other discriminant; carries the raw type string for diagnostics.
    Ignored(String),
}

impl ActionKind {
    /// Decode a `data` object according to the envelope's `type` string.
    ///
    /// Unhandled discriminants never fail; they decode to
    /// [`ActionKind::Ignored`].
    ///
    /// # Errors
    ///
    /// Returns a [`DataParseError`] if the payload of a handled action type
    /// does not match its schema.
    pub fn deserialize_for(raw_type: &str, data: serde_json::Value) -> Result<Self, DataParseError> {
        let Ok(action_type) = raw_type.parse::<ActionType>() else {
            return Ok(Self::Ignored(raw_type.to_string()));
        };

        let result = match action_type {
            ActionType::CreateCard => {
                serde_json::from_value::<CreateCardData>(data).map(Self::CreateCard)
            }
            ActionType::UpdateCard => {
                serde_json::from_value::<UpdateCardData>(data).map(Self::UpdateCard)
            }
        };

        result.map_err(|source| DataParseError {
            action_type,
            source,
        })
    }

    /// The handled action type, or `None` for ignored actions.
    #[must_use]
    pub const fn action_type(&self) -> Option<ActionType> {
        match self {
            Self::CreateCard(_) => Some(ActionType::CreateCard),
            Self::UpdateCard(_) => Some(ActionType::UpdateCard),
            Self::Ignored(_) => None,
        }
    }

    /// The card this action targets, if it targets one the replay tracks.
    #[must_use]
    pub const fn card_id(&self) -> Option<&CardId> {
        match self {
            Self::CreateCard(d) => Some(&d.card.id),
            Self::UpdateCard(d) => Some(&d.card.id),
            Self::Ignored(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DataParseError
// ---------------------------------------------------------------------------

/// Error returned when a handled action's `data` payload is malformed.
#[derive(Debug)]
pub struct DataParseError {
    /// The action type that was being decoded.
    pub action_type: ActionType,
    /// The underlying JSON error.
    pub source: serde_json::Error,
}

impl fmt::Display for DataParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} data payload: {}", self.action_type, self.source)
    }
}

impl std::error::Error for DataParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Payload structs
// ---------------------------------------------------------------------------

/// Minimal card reference carried by a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub id: CardId,
    pub name: String,
}

/// A board list as referenced from an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl ListRef {
    #[must_use]
    pub fn is_done(&self) -> bool {
        is_done_list(&self.name)
    }
}

/// Payload for `createCard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCardData {
    pub card: CardRef,
    /// The list the card was created in.
    pub list: ListRef,
}

/// Card fields as recorded by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: CardId,
    pub name: String,
    /// Absent means "not archived".
    #[serde(default)]
    pub closed: bool,
    /// Present only when the update carried label associations.
    #[serde(
        rename = "idLabels",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id_labels: Option<Vec<String>>,
}

/// The before/after pair of a list move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTransition {
    pub before: ListRef,
    pub after: ListRef,
}

impl ListTransition {
    /// A move counts as completion when its target list is a done list.
    #[must_use]
    pub fn completes(&self) -> bool {
        self.after.is_done()
    }
}

/// Payload for `updateCard`.
///
/// `transition` is populated only when the export recorded both the list
/// moved from and the list moved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UpdateCardRaw")]
pub struct UpdateCardData {
    pub card: CardSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<ListTransition>,
}

impl UpdateCardData {
    /// Returns `true` when this update moves the card into a done list.
    #[must_use]
    pub fn completes(&self) -> bool {
        self.transition.as_ref().is_some_and(ListTransition::completes)
    }
}

#[derive(Deserialize)]
struct UpdateCardRaw {
    card: CardSnapshot,
    #[serde(rename = "listBefore", default)]
    list_before: Option<ListRef>,
    #[serde(rename = "listAfter", default)]
    list_after: Option<ListRef>,
}

impl From<UpdateCardRaw> for UpdateCardData {
    fn from(raw: UpdateCardRaw) -> Self {
        let transition = match (raw.list_before, raw.list_after) {
            (Some(before), Some(after)) => Some(ListTransition { before, after }),
            _ => None,
        };
        Self {
            card: raw.card,
            transition,
        }
    }
}

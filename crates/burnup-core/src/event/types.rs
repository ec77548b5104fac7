//! Action discriminants the replay understands.
//!
//! Board exports carry dozens of action types (comments, member changes,
//! checklist edits, ...). Only card creation and card updates affect the
//! reconstructed state; every other discriminant is kept as an opaque
//! string and skipped by the replay.

use std::fmt;
use std::str::FromStr;

/// Action types that change reconstructed card state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// A card was created in some list.
    CreateCard,
    /// A card's fields changed; may include a list move.
    UpdateCard,
}

/// Error returned when parsing an action type the replay does not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActionType {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unhandled action type '{}': expected createCard or updateCard",
            self.raw
        )
    }
}

impl std::error::Error for UnknownActionType {}

impl ActionType {
    pub const ALL: [Self; 2] = [Self::CreateCard, Self::UpdateCard];

    /// The discriminant as it appears in the export.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateCard => "createCard",
            Self::UpdateCard => "updateCard",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = UnknownActionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createCard" => Ok(Self::CreateCard),
            "updateCard" => Ok(Self::UpdateCard),
            _ => Err(UnknownActionType { raw: s.to_string() }),
        }
    }
}

//! Board export decoding.
//!
//! Turns a board JSON export into a [`LabelCatalog`] and a typed action log.
//! The action log keeps the export's order (most recent first); reversing
//! it is the replay's job.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Classify, ErrorCode};
use crate::event::{Action, ActionDecodeError, ActionEnvelope};
use crate::model::label::LabelCatalog;

/// Errors from reading or decoding a board export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to read board export {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("board export is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A single action could not be decoded. Carries enough context to find
    /// it in the export.
    #[error("action #{index} (id {}, type {action_type}): {source}", .id.as_deref().unwrap_or("-"))]
    Action {
        index: usize,
        id: Option<String>,
        action_type: String,
        #[source]
        source: ActionDecodeError,
    },
}

impl Classify for ExportError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ExportReadFailed,
            Self::Json(_) | Self::Action { .. } => ErrorCode::ExportDecodeFailed,
        }
    }
}

#[derive(Deserialize)]
struct LabelRaw {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct ExportRaw {
    #[serde(default)]
    labels: Vec<LabelRaw>,
    actions: Vec<ActionEnvelope>,
}

/// A decoded board export.
#[derive(Debug, Clone, Default)]
pub struct BoardExport {
    /// Label id to display name.
    pub labels: LabelCatalog,
    /// Action log, most recent first.
    pub actions: Vec<Action>,
}

impl BoardExport {
    /// Decode an export from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Json`] if the document is not a board export
    /// and [`ExportError::Action`] for the first malformed action.
    pub fn from_json_str(json: &str) -> Result<Self, ExportError> {
        let raw: ExportRaw = serde_json::from_str(json)?;

        let labels = LabelCatalog::from_pairs(raw.labels.into_iter().map(|l| (l.id, l.name)));

        let actions = raw
            .actions
            .into_iter()
            .enumerate()
            .map(|(index, envelope)| {
                let id = envelope.id.clone();
                let action_type = envelope.action_type.clone();
                envelope
                    .into_action()
                    .map_err(|source| ExportError::Action {
                        index,
                        id,
                        action_type,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            labels = labels.len(),
            actions = actions.len(),
            "decoded board export"
        );

        Ok(Self { labels, actions })
    }

    /// Read and decode an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Read`] if the file cannot be read, otherwise
    /// the errors of [`BoardExport::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

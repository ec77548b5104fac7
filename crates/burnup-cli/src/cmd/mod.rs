pub mod cards;
pub mod completions;
pub mod report;
pub mod scope;

use std::path::Path;

use anyhow::Context;
use burnup_core::{BoardExport, Replay};
use tracing::debug;

/// Decode an export file and replay its action log.
pub fn load_replay(export: &Path) -> anyhow::Result<Replay> {
    let board = BoardExport::from_path(export)
        .with_context(|| format!("loading board export {}", export.display()))?;
    debug!(actions = board.actions.len(), "replaying export");
    Ok(Replay::from_export(&board))
}

//! Console listings of completed and open cards.
//!
//! ```text
//! Completed cards
//! ====================
//! 09/20  3  Write docs
//!
//! Uncompleted cards
//! ===========
//!  5  Ship it
//! ```

use std::io::{self, Write};

use crate::model::card::Card;

const COMPLETED_PADDING: usize = 10;
const OPEN_PADDING: usize = 4;

fn rule_width(cards: &[&Card], padding: usize) -> usize {
    cards
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        + padding
}

/// Write the completed-cards section. `cards` should already be sorted by
/// completion time.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_completed(out: &mut dyn Write, cards: &[&Card]) -> io::Result<()> {
    writeln!(out, "Completed cards")?;
    writeln!(out, "{}", "=".repeat(rule_width(cards, COMPLETED_PADDING)))?;
    for card in cards {
        let date = card
            .completion_time
            .map_or_else(|| "--/--".to_string(), |t| t.format("%m/%d").to_string());
        writeln!(out, "{date} {:2}  {}", card.story_points, card.name)?;
    }
    writeln!(out)
}

/// Write the open-cards section. `cards` should already be sorted by
/// creation time.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_open(out: &mut dyn Write, cards: &[&Card]) -> io::Result<()> {
    writeln!(out, "Uncompleted cards")?;
    writeln!(out, "{}", "=".repeat(rule_width(cards, OPEN_PADDING)))?;
    for card in cards {
        writeln!(out, "{:2}  {}", card.story_points, card.name)?;
    }
    writeln!(out)
}

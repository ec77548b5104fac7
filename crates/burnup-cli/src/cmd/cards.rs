//! `burnup cards <EXPORT>`: completed and open card listings.

use std::io::{self, Write};
use std::path::PathBuf;

use burnup_core::model::card::Card;
use burnup_core::replay::{Replay, ReplayStats};
use burnup_core::report::listing::{write_completed, write_open};
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `burnup cards`.
#[derive(Args, Debug)]
pub struct CardsArgs {
    /// Board export (JSON).
    pub export: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct CardListing<'a> {
    pub stats: ReplayStats,
    pub completed: Vec<&'a Card>,
    pub open: Vec<&'a Card>,
}

impl<'a> CardListing<'a> {
    pub fn from_replay(replay: &'a Replay) -> Self {
        Self {
            stats: replay.stats(),
            completed: replay.completed(),
            open: replay.open(),
        }
    }

    /// Both sections in the console format.
    pub fn write_sections(&self, w: &mut dyn Write) -> io::Result<()> {
        write_completed(w, &self.completed)?;
        write_open(w, &self.open)
    }

    fn write_stats(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_section(w, "Replay")?;
        pretty_kv(w, "Actions", self.stats.actions.to_string())?;
        pretty_kv(w, "Applied", self.stats.applied.to_string())?;
        pretty_kv(w, "Ignored", self.stats.ignored_kind.to_string())?;
        pretty_kv(w, "Unknown", self.stats.unknown_card.to_string())?;
        pretty_kv(w, "Duplicates", self.stats.duplicate_create.to_string())?;
        pretty_kv(w, "Stale done", self.stats.stale_completion.to_string())?;
        writeln!(w)
    }
}

/// Execute `burnup cards`.
pub fn run_cards(args: &CardsArgs, output: OutputMode) -> anyhow::Result<()> {
    let replay = super::load_replay(&args.export)?;
    let listing = CardListing::from_replay(&replay);

    render(output, &listing, |listing, mode, w| {
        if mode.is_pretty() {
            listing.write_stats(w)?;
        }
        listing.write_sections(w)
    })
}

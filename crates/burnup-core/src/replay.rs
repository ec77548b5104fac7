//! Action-log replay into per-card state.
//!
//! # Algorithm
//!
//! 1. Walk the export's action log back to front, which is chronological
//!    order (exports store the most recent action first).
//! 2. Fold every action into a map keyed by [`CardId`]. Each action's
//!    effect on a card is one of the pure transitions on [`Card`]:
//!    - `createCard` → [`Card::created`]
//!    - `updateCard` → [`Card::with_update`], followed by
//!      [`Card::with_completion`] when the update moves the card into a done
//!      list.
//! 3. Everything else is counted and skipped.
//!
//! # Policies
//!
//! - A creation for an id that already exists is ignored; the earlier
//!   state (and its accumulated updates) is kept.
//! - A completion earlier than the card's current completion is ignored,
//!   so `completion_time` never moves backwards.
//! - Updates, including completions, for ids never created are ignored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::event::{Action, ActionKind, CreateCardData, UpdateCardData};
use crate::export::BoardExport;
use crate::model::card::{Card, CardId};
use crate::model::label::LabelCatalog;

/// Counters describing what the replay did with each action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Actions seen.
    pub actions: usize,
    /// Actions that changed card state.
    pub applied: usize,
    /// Actions of a type the replay does not handle, or without a date.
    pub ignored_kind: usize,
    /// Updates for a card that was never created.
    pub unknown_card: usize,
    /// Creations for an id that already existed.
    pub duplicate_create: usize,
    /// Completions earlier than the recorded completion.
    pub stale_completion: usize,
}

/// Finalized card states after replaying a full action log.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    cards: BTreeMap<CardId, Card>,
    stats: ReplayStats,
}

impl Replay {
    /// Replay an action log stored most-recent-first.
    #[must_use]
    pub fn run(labels: &LabelCatalog, actions: &[Action]) -> Self {
        let replay = actions
            .iter()
            .rev()
            .fold(Self::default(), |acc, action| acc.apply(action, labels));

        info!(
            cards = replay.cards.len(),
            actions = replay.stats.actions,
            applied = replay.stats.applied,
            ignored = replay.stats.ignored_kind,
            unknown_card = replay.stats.unknown_card,
            "replayed action log"
        );
        replay
    }

    /// Replay a decoded export.
    #[must_use]
    pub fn from_export(export: &BoardExport) -> Self {
        Self::run(&export.labels, &export.actions)
    }

    /// Fold one action into the state.
    #[must_use]
    pub fn apply(mut self, action: &Action, labels: &LabelCatalog) -> Self {
        self.stats.actions += 1;
        match (&action.kind, action.date) {
            (ActionKind::CreateCard(data), Some(date)) => self.apply_create(date, data),
            (ActionKind::UpdateCard(data), Some(date)) => self.apply_update(date, data, labels),
            (ActionKind::Ignored(kind), _) => {
                debug!(action_type = %kind, "skipping unhandled action");
                self.stats.ignored_kind += 1;
            }
            (_, None) => {
                debug!(id = ?action.id, "skipping undated action");
                self.stats.ignored_kind += 1;
            }
        }
        self
    }

    fn apply_create(&mut self, date: DateTime<Utc>, data: &CreateCardData) {
        if self.cards.contains_key(&data.card.id) {
            warn!(card = %data.card.id, %date, "ignoring duplicate card creation");
            self.stats.duplicate_create += 1;
            return;
        }
        let card = Card::created(&data.card, &data.list.name, date);
        self.cards.insert(card.id.clone(), card);
        self.stats.applied += 1;
    }

    fn apply_update(&mut self, date: DateTime<Utc>, data: &UpdateCardData, labels: &LabelCatalog) {
        let Some(card) = self.cards.remove(&data.card.id) else {
            debug!(card = %data.card.id, "skipping update for unknown card");
            self.stats.unknown_card += 1;
            return;
        };

        let mut card = card.with_update(&data.card, labels);
        if data.completes() {
            let (next, applied) = card.with_completion(date);
            if !applied {
                warn!(
                    card = %next.id,
                    %date,
                    "ignoring completion earlier than the recorded one"
                );
                self.stats.stale_completion += 1;
            }
            card = next;
        }

        self.cards.insert(card.id.clone(), card);
        self.stats.applied += 1;
    }

    #[must_use]
    pub const fn stats(&self) -> ReplayStats {
        self.stats
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// All cards, ordered by id.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Completed cards, earliest completion first.
    #[must_use]
    pub fn completed(&self) -> Vec<&Card> {
        let mut done: Vec<&Card> = self.cards.values().filter(|c| c.is_completed()).collect();
        done.sort_by_key(|c| (c.completion_time, c.creation_time));
        done
    }

    /// Cards neither completed nor closed, oldest first.
    #[must_use]
    pub fn open(&self) -> Vec<&Card> {
        let mut open: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| !c.is_completed() && !c.closed)
            .collect();
        open.sort_by_key(|c| c.creation_time);
        open
    }

    /// Cards that feed the burnup aggregation: not closed and estimated.
    ///
    /// Completed cards are included; closed or unestimated ones are not.
    #[must_use]
    pub fn reportable(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .cards
            .values()
            .filter(|c| c.is_reportable())
            .cloned()
            .collect();
        cards.sort_by_key(|c| c.creation_time);
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CardRef, CardSnapshot, ListRef, ListTransition};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, day, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn list(name: &str) -> ListRef {
        ListRef {
            id: None,
            name: name.into(),
        }
    }

    fn create(id: &str, name: &str, list_name: &str, day: u32) -> Action {
        Action {
            id: None,
            date: Some(at(day)),
            kind: ActionKind::CreateCard(CreateCardData {
                card: CardRef {
                    id: CardId::new(id),
                    name: name.into(),
                },
                list: list(list_name),
            }),
        }
    }

    fn update(id: &str, name: &str, labels: Option<&[&str]>, closed: bool, day: u32) -> Action {
        Action {
            id: None,
            date: Some(at(day)),
            kind: ActionKind::UpdateCard(UpdateCardData {
                card: CardSnapshot {
                    id: CardId::new(id),
                    name: name.into(),
                    closed,
                    id_labels: labels.map(|l| l.iter().map(|s| (*s).to_string()).collect()),
                },
                transition: None,
            }),
        }
    }

    fn moved(id: &str, name: &str, from: &str, to: &str, day: u32) -> Action {
        Action {
            id: None,
            date: Some(at(day)),
            kind: ActionKind::UpdateCard(UpdateCardData {
                card: CardSnapshot {
                    id: CardId::new(id),
                    name: name.into(),
                    closed: false,
                    id_labels: None,
                },
                transition: Some(ListTransition {
                    before: list(from),
                    after: list(to),
                }),
            }),
        }
    }

    fn ignored(day: u32) -> Action {
        Action {
            id: None,
            date: Some(at(day)),
            kind: ActionKind::Ignored("commentCard".into()),
        }
    }

    fn labels() -> LabelCatalog {
        LabelCatalog::from_pairs([("sp3", "3 SP"), ("sp5", "Story Points: 5"), ("misc", "misc")])
    }

    /// Build a most-recent-first log from chronological actions.
    fn log(mut chronological: Vec<Action>) -> Vec<Action> {
        chronological.reverse();
        chronological
    }

    #[test]
    fn replays_in_chronological_order() {
        let actions = log(vec![
            create("c1", "Draft", "To Do", 1),
            update("c1", "Second", Some(&["sp3"]), false, 2),
            update("c1", "Final", None, false, 3),
        ]);
        let replay = Replay::run(&labels(), &actions);
        let card = replay.get(&CardId::new("c1")).expect("card");
        assert_eq!(card.name, "Final");
        assert_eq!(card.story_points, 3);
        assert_eq!(replay.stats().applied, 3);
    }

    #[test]
    fn updates_for_unknown_cards_are_ignored() {
        let actions = log(vec![
            update("ghost", "Boo", Some(&["sp3"]), false, 1),
            moved("ghost", "Boo", "Doing", "Done", 2),
        ]);
        let replay = Replay::run(&labels(), &actions);
        assert!(replay.is_empty());
        assert_eq!(replay.stats().unknown_card, 2);
    }

    #[test]
    fn duplicate_creation_keeps_first_state() {
        let actions = log(vec![
            create("c1", "Original", "To Do", 1),
            update("c1", "Original", Some(&["sp5"]), false, 2),
            create("c1", "Impostor", "Done", 3),
        ]);
        let replay = Replay::run(&labels(), &actions);
        let card = replay.get(&CardId::new("c1")).expect("card");
        assert_eq!(card.name, "Original");
        assert_eq!(card.story_points, 5);
        assert_eq!(card.creation_time, at(1));
        assert!(card.completion_time.is_none());
        assert_eq!(replay.stats().duplicate_create, 1);
    }

    #[test]
    fn move_to_done_completes_and_later_move_overwrites() {
        let actions = log(vec![
            create("c1", "A", "To Do", 1),
            moved("c1", "A", "To Do", "Done", 4),
            moved("c1", "A", "Done", "Doing", 5),
            moved("c1", "A", "Doing", "Done (QA)", 7),
        ]);
        let replay = Replay::run(&labels(), &actions);
        let card = replay.get(&CardId::new("c1")).expect("card");
        assert_eq!(card.completion_time, Some(at(7)));
    }

    #[test]
    fn moving_out_of_done_does_not_uncomplete() {
        let actions = log(vec![
            create("c1", "A", "To Do", 1),
            moved("c1", "A", "To Do", "Done", 4),
            moved("c1", "A", "Done", "Doing", 5),
        ]);
        let replay = Replay::run(&labels(), &actions);
        let card = replay.get(&CardId::new("c1")).expect("card");
        assert_eq!(card.completion_time, Some(at(4)));
    }

    #[test]
    fn out_of_order_completion_does_not_regress() {
        // Log order (newest first) claims day 3 happened after day 8.
        let actions = vec![
            moved("c1", "A", "Doing", "Done", 3),
            moved("c1", "A", "To Do", "Done", 8),
            create("c1", "A", "To Do", 1),
        ];
        let replay = Replay::run(&labels(), &actions);
        let card = replay.get(&CardId::new("c1")).expect("card");
        assert_eq!(card.completion_time, Some(at(8)));
        assert_eq!(replay.stats().stale_completion, 1);
    }

    #[test]
    fn unhandled_actions_are_counted() {
        let actions = log(vec![create("c1", "A", "To Do", 1), ignored(2), ignored(3)]);
        let replay = Replay::run(&labels(), &actions);
        assert_eq!(replay.stats().actions, 3);
        assert_eq!(replay.stats().ignored_kind, 2);
        assert_eq!(replay.stats().applied, 1);
    }

    #[test]
    fn views_partition_and_sort() {
        let actions = log(vec![
            create("late", "Late open", "To Do", 5),
            create("early", "Early open", "To Do", 2),
            create("d2", "Done second", "To Do", 1),
            create("d1", "Done first", "Done", 3),
            create("gone", "Archived", "To Do", 1),
            update("gone", "Archived", None, true, 4),
            moved("d2", "Done second", "To Do", "Done", 6),
        ]);
        let replay = Replay::run(&labels(), &actions);

        let completed: Vec<&str> = replay.completed().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(completed, ["d1", "d2"]);

        let open: Vec<&str> = replay.open().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(open, ["early", "late"]);
    }

    #[test]
    fn empty_views_are_valid() {
        let replay = Replay::run(&labels(), &[]);
        assert!(replay.completed().is_empty());
        assert!(replay.open().is_empty());
        assert!(replay.reportable().is_empty());
    }

    #[test]
    fn reportable_excludes_closed_and_unestimated() {
        let actions = log(vec![
            create("est", "Estimated", "To Do", 1),
            update("est", "Estimated", Some(&["sp3"]), false, 2),
            create("zero", "No estimate", "Done", 1),
            update("zero", "No estimate", Some(&["misc"]), false, 2),
            create("closed", "Closed", "To Do", 1),
            update("closed", "Closed", Some(&["sp5"]), true, 2),
        ]);
        let replay = Replay::run(&labels(), &actions);
        let ids: Vec<String> = replay
            .reportable()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, ["est"]);
    }
}

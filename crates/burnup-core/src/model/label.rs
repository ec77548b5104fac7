//! Label catalog and story-point resolution.
//!
//! Boards encode estimates in label text, either as `Story Points: <n>` or
//! as `<n> SP`. Both forms are anchored at the start of the label name and
//! are case-sensitive; anything after the number is ignored.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static STORY_POINTS_REGEX: OnceLock<Regex> = OnceLock::new();
static SP_SUFFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn story_points_regex() -> &'static Regex {
    STORY_POINTS_REGEX
        .get_or_init(|| Regex::new(r"^Story Points: (\d+)").expect("Invalid story points regex"))
}

fn sp_suffix_regex() -> &'static Regex {
    SP_SUFFIX_REGEX.get_or_init(|| Regex::new(r"^(\d+) SP").expect("Invalid SP regex"))
}

/// Parse a story-point estimate out of a single label name.
///
/// Returns `None` for labels that carry no estimate, including numbers too
/// large to represent.
#[must_use]
pub fn parse_story_points(label_name: &str) -> Option<u32> {
    [story_points_regex(), sp_suffix_regex()]
        .into_iter()
        .find_map(|re| re.captures(label_name))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Read-only mapping from label id to display name, built once per export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCatalog {
    names: HashMap<String, String>,
}

impl LabelCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(id, name)` pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    /// Display name for a label id, if the catalog knows it.
    #[must_use]
    pub fn name(&self, label_id: &str) -> Option<&str> {
        self.names.get(label_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve the story points for a card's label ids.
    ///
    /// Labels are scanned in the given order and the first one carrying an
    /// estimate decides. Ids missing from the catalog are skipped. Returns 0
    /// when no label matches.
    #[must_use]
    pub fn story_points(&self, label_ids: &[String]) -> u32 {
        label_ids
            .iter()
            .filter_map(|id| self.name(id))
            .find_map(parse_story_points)
            .unwrap_or(0)
    }
}

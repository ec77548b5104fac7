pub mod card;
pub mod label;

pub use card::{Card, CardId, is_done_list};
pub use label::{LabelCatalog, parse_story_points};

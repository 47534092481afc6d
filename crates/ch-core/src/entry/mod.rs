//! History entry model.
mod model;
mod view;

pub use model::{DedupKey, Entry, EntryCandidate, EntryContent, EntryKind, ImageContent};
pub use view::{display_title, matches_query};

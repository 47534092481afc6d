//! Ordered, size-bounded, deduplicated, pin-aware history.
mod snapshot;
mod store;

pub use snapshot::HistorySnapshot;
pub use store::{HistoryStore, RecordOutcome};

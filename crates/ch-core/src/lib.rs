//! # ch-core
//!
//! Core domain models and history logic for Clipboard History.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Everything that touches the operating system, the filesystem or a clock is
//! reached through a port in [`ports`].

pub mod app_dirs;
pub mod clipboard;
pub mod entry;
pub mod history;
pub mod hotkey;
pub mod ids;
pub mod persistence;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{ChangeToken, ClipboardSnapshot, ContentHash, ContentTag, HashAlgorithm};
pub use entry::{DedupKey, Entry, EntryCandidate, EntryContent, EntryKind, ImageContent};
pub use history::{HistorySnapshot, HistoryStore, RecordOutcome};
pub use hotkey::HotkeySpec;
pub use ids::EntryId;
pub use settings::HistorySettings;

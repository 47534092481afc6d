//! Clipboard domain models: what the clipboard source hands to the engine.
mod hash;
mod snapshot;

pub use hash::{ContentHash, HashAlgorithm};
pub use snapshot::{ChangeToken, ClipboardSnapshot, ContentTag};

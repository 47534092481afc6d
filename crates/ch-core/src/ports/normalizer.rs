use crate::clipboard::ClipboardSnapshot;
use crate::entry::EntryCandidate;

/// Turns a raw snapshot into a candidate entry.
///
/// Rejection (`None`) is a normal outcome: empty text, undecodable images and
/// unsupported payload types are all silently ignored. Implementations have
/// no side effects.
pub trait ContentNormalizerPort: Send + Sync {
    fn normalize(&self, snapshot: &ClipboardSnapshot) -> Option<EntryCandidate>;
}

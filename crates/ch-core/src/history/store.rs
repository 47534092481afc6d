use std::collections::HashSet;

use tracing::debug;

use crate::entry::{Entry, EntryCandidate};
use crate::ids::EntryId;
use crate::settings::clamp_max_items;

/// What a call to [`HistoryStore::record`] did to the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The candidate equals the front unpinned entry; the sequence is untouched.
    Unchanged,
    Recorded {
        id: EntryId,
        /// Earlier occurrence of the same content that was removed.
        replaced: Option<EntryId>,
        /// Entries dropped from the unpinned tail to honour `max_items`.
        evicted: Vec<EntryId>,
    },
}

impl RecordOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, RecordOutcome::Unchanged)
    }
}

/// In-memory history sequence.
///
/// Invariants held after every public call:
/// - no two entries share a dedup key;
/// - pinned entries form the prefix, unpinned entries follow newest-first;
/// - the sequence never exceeds `max_items` unless pinned entries alone do
///   (pinned entries are never evicted).
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Vec<Entry>,
    max_items: usize,
}

impl HistoryStore {
    pub fn new(max_items: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_items: clamp_max_items(i64::try_from(max_items).unwrap_or(i64::MAX)),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn pinned_count(&self) -> usize {
        self.entries.iter().take_while(|entry| entry.is_pinned).count()
    }

    /// Record a normalized capture under a fresh `id` stamped `now_ms`.
    pub fn record(&mut self, candidate: EntryCandidate, id: EntryId, now_ms: i64) -> RecordOutcome {
        let pinned = self.pinned_count();
        if let Some(front) = self.entries.get(pinned) {
            if front.dedup_key() == candidate.dedup_key() {
                return RecordOutcome::Unchanged;
            }
        }

        let duplicate = self
            .entries
            .iter()
            .position(|entry| entry.dedup_key() == candidate.dedup_key());
        let replaced = duplicate.map(|index| self.entries.remove(index).id);

        let at = self.pinned_count();
        self.entries
            .insert(at, Entry::new(id.clone(), candidate.content, now_ms));
        let evicted = self.enforce_capacity();

        debug!(
            entry_id = %id,
            replaced = replaced.is_some(),
            evicted = evicted.len(),
            len = self.entries.len(),
            "Recorded clipboard entry"
        );

        RecordOutcome::Recorded {
            id,
            replaced,
            evicted,
        }
    }

    /// Flip the pin flag of `id` and move it to the pinned/unpinned boundary.
    ///
    /// Returns the new pin state, or `None` when no entry has this id.
    pub fn toggle_pin(&mut self, id: &EntryId) -> Option<bool> {
        let index = self.entries.iter().position(|entry| &entry.id == id)?;
        let mut entry = self.entries.remove(index);
        entry.is_pinned = !entry.is_pinned;
        let is_pinned = entry.is_pinned;

        // Newly pinned lands at the end of the pinned prefix, newly unpinned at
        // the front of the unpinned region: both are the same boundary index.
        let at = self.pinned_count();
        self.entries.insert(at, entry);
        Some(is_pinned)
    }

    /// Remove everything, pinned entries included. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Clamp and apply a new bound, evicting from the unpinned tail.
    pub fn set_max_items(&mut self, n: i64) -> Vec<EntryId> {
        self.max_items = clamp_max_items(n);
        self.enforce_capacity()
    }

    /// Replace the sequence with previously persisted entries.
    ///
    /// The input is sanitized so the invariants hold regardless of what was on
    /// disk: later duplicates are dropped, pinned entries are moved to the
    /// prefix preserving relative order, then capacity is enforced.
    pub fn restore(&mut self, entries: Vec<Entry>) {
        let total = entries.len();
        let mut seen_ids = HashSet::new();
        let mut kept: Vec<Entry> = Vec::with_capacity(total);
        for entry in entries {
            let is_duplicate = kept
                .iter()
                .any(|existing| existing.dedup_key() == entry.dedup_key());
            if is_duplicate || !seen_ids.insert(entry.id.clone()) {
                continue;
            }
            kept.push(entry);
        }

        let (mut ordered, unpinned): (Vec<Entry>, Vec<Entry>) =
            kept.into_iter().partition(|entry| entry.is_pinned);
        ordered.extend(unpinned);
        self.entries = ordered;
        let evicted = self.enforce_capacity();

        debug!(
            restored = self.entries.len(),
            dropped = total - self.entries.len() - evicted.len(),
            evicted = evicted.len(),
            "Restored history"
        );
    }

    fn enforce_capacity(&mut self) -> Vec<EntryId> {
        let mut evicted = Vec::new();
        while self.entries.len() > self.max_items {
            match self.entries.last() {
                Some(last) if !last.is_pinned => {
                    if let Some(entry) = self.entries.pop() {
                        evicted.push(entry.id);
                    }
                }
                // Only pinned entries remain past the bound.
                _ => break,
            }
        }
        evicted
    }
}

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::clipboard::ContentHash;
use crate::ids::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Text,
    Image,
}

/// Canonical bitmap of an image capture.
///
/// `png` holds the canonical encoding and `hash` is the fingerprint of exactly
/// those bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    pub png: Bytes,
    pub hash: ContentHash,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// Trimmed, never empty.
    Text(String),
    Image(ImageContent),
}

impl EntryContent {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryContent::Text(_) => EntryKind::Text,
            EntryContent::Image(_) => EntryKind::Image,
        }
    }

    pub fn dedup_key(&self) -> DedupKey<'_> {
        match self {
            EntryContent::Text(text) => DedupKey::Text(text),
            EntryContent::Image(image) => DedupKey::Image(&image.hash),
        }
    }
}

/// `(kind, normalized content)`: two entries with equal keys are duplicates.
///
/// Images compare by fingerprint only, never byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DedupKey<'a> {
    Text(&'a str),
    Image(&'a ContentHash),
}

/// Normalizer output: content accepted for recording but not yet given an
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCandidate {
    pub content: EntryContent,
}

impl EntryCandidate {
    pub fn new(content: EntryContent) -> Self {
        Self { content }
    }

    pub fn dedup_key(&self) -> DedupKey<'_> {
        self.content.dedup_key()
    }
}

/// One recorded clipboard capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub content: EntryContent,
    pub created_at_ms: i64,
    pub is_pinned: bool,
}

impl Entry {
    pub fn new(id: EntryId, content: EntryContent, created_at_ms: i64) -> Self {
        Self {
            id,
            content,
            created_at_ms,
            is_pinned: false,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.content.kind()
    }

    pub fn dedup_key(&self) -> DedupKey<'_> {
        self.content.dedup_key()
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            EntryContent::Text(text) => Some(text),
            EntryContent::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&ImageContent> {
        match &self.content {
            EntryContent::Text(_) => None,
            EntryContent::Image(image) => Some(image),
        }
    }
}

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clipboard::ContentHash;
use crate::entry::{Entry, EntryContent, EntryKind, ImageContent};
use crate::ids::EntryId;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub const SCHEMA_VERSION_SLOT: &str = "history.schema_version";
pub const ENTRIES_SLOT: &str = "history.entries";
pub const MAX_ITEMS_SLOT: &str = "history.max_items";
pub const AUTO_PASTE_SLOT: &str = "history.auto_paste";

/// On-disk form of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEntry {
    pub id: String,
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Canonical PNG, base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_png: Option<String>,
    /// Hex fingerprint of the canonical PNG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub created_at_ms: i64,
    #[serde(default)]
    pub is_pinned: bool,
}

impl From<&Entry> for PersistedEntry {
    fn from(entry: &Entry) -> Self {
        let mut persisted = PersistedEntry {
            id: entry.id.to_string(),
            kind: entry.kind(),
            text: None,
            image_png: None,
            image_hash: None,
            width: None,
            height: None,
            created_at_ms: entry.created_at_ms,
            is_pinned: entry.is_pinned,
        };
        match &entry.content {
            EntryContent::Text(text) => persisted.text = Some(text.clone()),
            EntryContent::Image(image) => {
                persisted.image_png = Some(STANDARD.encode(&image.png));
                persisted.image_hash = Some(image.hash.to_hex());
                persisted.width = Some(image.width);
                persisted.height = Some(image.height);
            }
        }
        persisted
    }
}

impl TryFrom<PersistedEntry> for Entry {
    type Error = anyhow::Error;

    fn try_from(persisted: PersistedEntry) -> Result<Self> {
        if persisted.id.is_empty() {
            return Err(anyhow!("entry id is empty"));
        }

        let content = match persisted.kind {
            EntryKind::Text => {
                let text = persisted
                    .text
                    .ok_or_else(|| anyhow!("text entry {} has no text", persisted.id))?;
                let text = text.trim();
                if text.is_empty() {
                    return Err(anyhow!("text entry {} is empty", persisted.id));
                }
                EntryContent::Text(text.to_string())
            }
            EntryKind::Image => {
                let png = persisted
                    .image_png
                    .ok_or_else(|| anyhow!("image entry {} has no bytes", persisted.id))?;
                let png = STANDARD
                    .decode(png)
                    .with_context(|| format!("image entry {} bytes are not base64", persisted.id))?;
                if png.is_empty() {
                    return Err(anyhow!("image entry {} has no bytes", persisted.id));
                }
                let hash = persisted
                    .image_hash
                    .ok_or_else(|| anyhow!("image entry {} has no hash", persisted.id))?;
                EntryContent::Image(ImageContent {
                    png: Bytes::from(png),
                    hash: ContentHash::from_hex(&hash)?,
                    width: persisted.width.unwrap_or(0),
                    height: persisted.height.unwrap_or(0),
                })
            }
        };

        Ok(Entry {
            id: EntryId::from(persisted.id),
            content,
            created_at_ms: persisted.created_at_ms,
            is_pinned: persisted.is_pinned,
        })
    }
}

/// Encode the full sequence, order preserved.
pub fn encode_entries(entries: &[Entry]) -> Result<serde_json::Value> {
    let persisted: Vec<PersistedEntry> = entries.iter().map(PersistedEntry::from).collect();
    serde_json::to_value(persisted).context("serialize history entries failed")
}

/// Decode the entries slot.
///
/// A slot that is not an array is an error (treated by callers as "no
/// history"). Individual malformed entries are skipped with a warning so one
/// bad record does not cost the rest of the history.
pub fn decode_entries(value: serde_json::Value) -> Result<Vec<Entry>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_value(value).context("history entries slot is not an array")?;

    let mut entries = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        let decoded = serde_json::from_value::<PersistedEntry>(item)
            .map_err(anyhow::Error::from)
            .and_then(Entry::try_from);
        match decoded {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!(index, error = %err, "Skipping malformed persisted entry"),
        }
    }
    Ok(entries)
}

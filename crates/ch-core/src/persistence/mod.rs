//! Persisted history record: slot names and the entry codec.
mod record;

pub use record::{
    decode_entries, encode_entries, PersistedEntry, AUTO_PASTE_SLOT, CURRENT_SCHEMA_VERSION,
    ENTRIES_SLOT, MAX_ITEMS_SLOT, SCHEMA_VERSION_SLOT,
};

//! History engine: the single serialized owner of the history.
//!
//! Every mutation takes one lock for its whole read-modify-write-persist
//! cycle, so poller-driven captures and user actions never interleave. After
//! each mutation the observable state is published on a `watch` channel.
//!
//! Persistence is best effort. Failures go to the [`PersistenceEventsPort`]
//! and never reach the caller; the in-memory history stays authoritative and
//! the next successful write catches the file up.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use ch_core::persistence::{
    decode_entries, encode_entries, AUTO_PASTE_SLOT, CURRENT_SCHEMA_VERSION, ENTRIES_SLOT,
    MAX_ITEMS_SLOT, SCHEMA_VERSION_SLOT,
};
use ch_core::ports::{ClockPort, KeyValueStorePort, PersistenceEventsPort};
use ch_core::settings::clamp_max_items;
use ch_core::{
    Entry, EntryCandidate, EntryId, HistorySettings, HistorySnapshot, HistoryStore, RecordOutcome,
};
use serde_json::Value;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

struct EngineState {
    store: HistoryStore,
    auto_paste_enabled: bool,
}

impl EngineState {
    fn settings(&self) -> HistorySettings {
        HistorySettings {
            max_items: self.store.max_items(),
            auto_paste_enabled: self.auto_paste_enabled,
        }
    }

    fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(self.store.entries().to_vec(), self.settings())
    }
}

pub struct HistoryEngine {
    state: Mutex<EngineState>,
    storage: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    events: Arc<dyn PersistenceEventsPort>,
    snapshot_tx: watch::Sender<HistorySnapshot>,
}

impl HistoryEngine {
    /// Empty history with default settings. Call [`Self::load_persisted`] to
    /// restore what was saved.
    pub fn new(
        storage: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
        events: Arc<dyn PersistenceEventsPort>,
    ) -> Self {
        let defaults = HistorySettings::default();
        let state = EngineState {
            store: HistoryStore::new(defaults.max_items),
            auto_paste_enabled: defaults.auto_paste_enabled,
        };
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        Self {
            state: Mutex::new(state),
            storage,
            clock,
            events,
            snapshot_tx,
        }
    }

    pub async fn snapshot(&self) -> HistorySnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn settings(&self) -> HistorySettings {
        self.state.lock().await.settings()
    }

    pub async fn entry(&self, id: &EntryId) -> Option<Entry> {
        self.state.lock().await.store.get(id).cloned()
    }

    /// Receiver that always holds the latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn record(&self, candidate: EntryCandidate) -> RecordOutcome {
        let mut state = self.state.lock().await;
        let outcome = state
            .store
            .record(candidate, EntryId::new(), self.clock.now_ms());
        if outcome.is_changed() {
            self.write_entries(&state).await;
            self.publish(&state);
        }
        outcome
    }

    /// Returns the new pin state, or `None` for an unknown id.
    pub async fn toggle_pin(&self, id: &EntryId) -> Option<bool> {
        let mut state = self.state.lock().await;
        let pinned = state.store.toggle_pin(id)?;
        self.write_entries(&state).await;
        self.publish(&state);
        Some(pinned)
    }

    /// Remove every entry, pinned ones included.
    pub async fn clear(&self) -> usize {
        let mut state = self.state.lock().await;
        let removed = state.store.clear();
        self.write_entries(&state).await;
        self.publish(&state);
        info!(removed, "Cleared history");
        removed
    }

    /// Clamp to the allowed range and evict from the unpinned tail.
    pub async fn set_max_items(&self, n: i64) -> Vec<EntryId> {
        let mut state = self.state.lock().await;
        let evicted = state.store.set_max_items(n);
        let max_items = state.store.max_items();

        self.write_slot(MAX_ITEMS_SLOT, Value::from(max_items as u64))
            .await;
        if !evicted.is_empty() {
            self.write_entries(&state).await;
        }
        self.publish(&state);

        info!(requested = n, max_items, evicted = evicted.len(), "Updated max items");
        evicted
    }

    pub async fn set_auto_paste(&self, enabled: bool) {
        let mut state = self.state.lock().await;
        state.auto_paste_enabled = enabled;
        self.write_slot(AUTO_PASTE_SLOT, Value::Bool(enabled)).await;
        self.publish(&state);
        info!(enabled, "Updated auto-paste");
    }

    /// Replace the in-memory history with the persisted one.
    ///
    /// Every slot decodes on its own: a missing or corrupt slot falls back to
    /// its default and never fails the load.
    pub async fn load_persisted(&self) -> HistorySnapshot {
        let mut state = self.state.lock().await;

        self.check_schema_version().await;
        let max_items = self
            .load_slot(MAX_ITEMS_SLOT, |value| {
                value
                    .as_i64()
                    .map(clamp_max_items)
                    .ok_or_else(|| anyhow!("expected an integer, found {value}"))
            })
            .await
            .unwrap_or(HistorySettings::default().max_items);
        let auto_paste_enabled = self
            .load_slot(AUTO_PASTE_SLOT, |value| {
                value
                    .as_bool()
                    .ok_or_else(|| anyhow!("expected a bool, found {value}"))
            })
            .await
            .unwrap_or(HistorySettings::default().auto_paste_enabled);
        let entries = self
            .load_slot(ENTRIES_SLOT, |value| decode_entries(value.clone()))
            .await
            .unwrap_or_default();

        let mut store = HistoryStore::new(max_items);
        store.restore(entries);
        state.store = store;
        state.auto_paste_enabled = auto_paste_enabled;

        info!(
            entries = state.store.len(),
            max_items = state.store.max_items(),
            auto_paste_enabled,
            "Loaded persisted history"
        );
        self.publish(&state);
        state.snapshot()
    }

    /// Write the full sequence now.
    pub async fn persist(&self) {
        let state = self.state.lock().await;
        self.write_entries(&state).await;
    }

    async fn write_entries(&self, state: &EngineState) {
        let encoded = match encode_entries(state.store.entries()) {
            Ok(value) => value,
            Err(err) => {
                self.events.persist_failed(ENTRIES_SLOT, &err);
                return;
            }
        };
        let values = vec![
            (
                SCHEMA_VERSION_SLOT.to_string(),
                Value::from(CURRENT_SCHEMA_VERSION),
            ),
            (ENTRIES_SLOT.to_string(), encoded),
        ];
        match self.storage.set_many(values).await {
            Ok(()) => self.events.persisted(ENTRIES_SLOT),
            Err(err) => self.events.persist_failed(ENTRIES_SLOT, &err),
        }
    }

    async fn write_slot(&self, slot: &str, value: Value) {
        match self.storage.set(slot, value).await {
            Ok(()) => self.events.persisted(slot),
            Err(err) => self.events.persist_failed(slot, &err),
        }
    }

    /// `None` when the slot is absent or unusable; failures are reported.
    async fn load_slot<T>(
        &self,
        slot: &str,
        decode: impl FnOnce(&Value) -> Result<T>,
    ) -> Option<T> {
        let value = match self.storage.get(slot).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(slot, "Persisted slot absent, using default");
                return None;
            }
            Err(err) => {
                self.events.load_failed(slot, &err);
                return None;
            }
        };
        match decode(&value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                self.events.load_failed(slot, &err);
                None
            }
        }
    }

    async fn check_schema_version(&self) {
        let version = self
            .load_slot(SCHEMA_VERSION_SLOT, |value| {
                value
                    .as_u64()
                    .ok_or_else(|| anyhow!("expected an integer, found {value}"))
            })
            .await;
        if let Some(version) = version {
            if version != u64::from(CURRENT_SCHEMA_VERSION) {
                warn!(
                    found = version,
                    expected = CURRENT_SCHEMA_VERSION,
                    "Unknown history schema version, decoding best effort"
                );
            }
        }
    }

    fn publish(&self, state: &EngineState) {
        self.snapshot_tx.send_replace(state.snapshot());
    }
}

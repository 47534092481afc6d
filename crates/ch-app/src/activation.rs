//! Activation interface exposed to the presentation layer.
//!
//! Presentation code renders [`HistorySnapshot`]s from [`Activation::subscribe`]
//! and calls back in for every user action. It never touches the engine or a
//! port directly.

use std::sync::Arc;

use anyhow::Result;
use ch_core::{Entry, EntryCandidate, EntryId, HistorySnapshot, RecordOutcome};
use tokio::sync::watch;

use crate::deps::AppDeps;
use crate::engine::HistoryEngine;
use crate::usecases::{
    ClearHistory, ListEntries, LoadHistory, SelectEntry, SetAutoPaste, SetMaxItems,
    StartClipboardWatcher, StartClipboardWatcherError, StopClipboardWatcher,
    StopClipboardWatcherError, TogglePin,
};

pub struct Activation {
    engine: Arc<HistoryEngine>,
    list_entries: ListEntries,
    select_entry: SelectEntry,
    toggle_pin: TogglePin,
    clear_history: ClearHistory,
    set_max_items: SetMaxItems,
    set_auto_paste: SetAutoPaste,
    load_history: LoadHistory,
    start_watcher: StartClipboardWatcher,
    stop_watcher: StopClipboardWatcher,
}

impl Activation {
    pub fn new(engine: Arc<HistoryEngine>, deps: AppDeps) -> Self {
        Self {
            list_entries: ListEntries::new(engine.clone()),
            select_entry: SelectEntry::new(engine.clone(), deps.clipboard_sink, deps.paste),
            toggle_pin: TogglePin::new(engine.clone()),
            clear_history: ClearHistory::new(engine.clone()),
            set_max_items: SetMaxItems::new(engine.clone()),
            set_auto_paste: SetAutoPaste::new(engine.clone()),
            load_history: LoadHistory::new(engine.clone()),
            start_watcher: StartClipboardWatcher::new(deps.watcher_control.clone()),
            stop_watcher: StopClipboardWatcher::new(deps.watcher_control),
            engine,
        }
    }

    /// Record a candidate directly, bypassing the clipboard.
    pub async fn record(&self, candidate: EntryCandidate) -> RecordOutcome {
        self.engine.record(candidate).await
    }

    pub async fn toggle_pin(&self, id: &EntryId) -> Option<bool> {
        self.toggle_pin.execute(id).await
    }

    pub async fn clear(&self) -> usize {
        self.clear_history.execute().await
    }

    pub async fn set_max_items(&self, max_items: i64) -> Vec<EntryId> {
        self.set_max_items.execute(max_items).await
    }

    pub async fn set_auto_paste(&self, enabled: bool) {
        self.set_auto_paste.execute(enabled).await
    }

    pub async fn load_persisted(&self) -> HistorySnapshot {
        self.load_history.execute().await
    }

    /// Write the entry back to the clipboard, then auto-paste if enabled.
    pub async fn select(&self, id: &EntryId) -> Result<bool> {
        self.select_entry.execute(id).await
    }

    pub async fn list(&self, query: &str) -> Vec<Entry> {
        self.list_entries.execute(query).await
    }

    pub async fn snapshot(&self) -> HistorySnapshot {
        self.engine.snapshot().await
    }

    pub fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.engine.subscribe()
    }

    /// `loadPersisted` then start polling.
    pub async fn start(&self) -> Result<HistorySnapshot, StartClipboardWatcherError> {
        let snapshot = self.load_persisted().await;
        self.start_watcher.execute().await?;
        Ok(snapshot)
    }

    /// Halt polling; state is retained in memory and on disk.
    pub async fn stop(&self) -> Result<(), StopClipboardWatcherError> {
        self.stop_watcher.execute().await
    }
}

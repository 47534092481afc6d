use std::sync::Arc;

use ch_core::Entry;

use crate::engine::HistoryEngine;

/// Entries matching a search query, in history order.
///
/// Empty query returns everything; text matches case-insensitively and
/// images match queries that are part of the word "image".
pub struct ListEntries {
    engine: Arc<HistoryEngine>,
}

impl ListEntries {
    pub fn new(engine: Arc<HistoryEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self, query: &str) -> Vec<Entry> {
        let snapshot = self.engine.snapshot().await;
        snapshot.filtered(query).cloned().collect()
    }
}

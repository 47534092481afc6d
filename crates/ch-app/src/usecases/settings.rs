//! History configuration use cases. Both scalars persist immediately.

use std::sync::Arc;

use ch_core::EntryId;

use crate::engine::HistoryEngine;

/// Change the history bound. Out-of-range values are clamped to `[5, 500]`.
pub struct SetMaxItems {
    engine: Arc<HistoryEngine>,
}

impl SetMaxItems {
    pub fn new(engine: Arc<HistoryEngine>) -> Self {
        Self { engine }
    }

    /// Ids evicted from the unpinned tail.
    #[tracing::instrument(name = "usecase.set_max_items.execute", skip(self))]
    pub async fn execute(&self, max_items: i64) -> Vec<EntryId> {
        self.engine.set_max_items(max_items).await
    }
}

pub struct SetAutoPaste {
    engine: Arc<HistoryEngine>,
}

impl SetAutoPaste {
    pub fn new(engine: Arc<HistoryEngine>) -> Self {
        Self { engine }
    }

    #[tracing::instrument(name = "usecase.set_auto_paste.execute", skip(self))]
    pub async fn execute(&self, enabled: bool) {
        self.engine.set_auto_paste(enabled).await
    }
}

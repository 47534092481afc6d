use std::sync::Arc;

use ch_core::HistorySnapshot;

use crate::engine::HistoryEngine;

/// Restore the persisted history. Never fails: unreadable state loads as an
/// empty history with default settings.
pub struct LoadHistory {
    engine: Arc<HistoryEngine>,
}

impl LoadHistory {
    pub fn new(engine: Arc<HistoryEngine>) -> Self {
        Self { engine }
    }

    #[tracing::instrument(name = "usecase.load_history.execute", skip(self))]
    pub async fn execute(&self) -> HistorySnapshot {
        self.engine.load_persisted().await
    }
}

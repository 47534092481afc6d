use std::sync::Arc;

use crate::engine::HistoryEngine;

/// Remove every entry, pinned ones included.
pub struct ClearHistory {
    engine: Arc<HistoryEngine>,
}

impl ClearHistory {
    pub fn new(engine: Arc<HistoryEngine>) -> Self {
        Self { engine }
    }

    #[tracing::instrument(name = "usecase.clear_history.execute", skip(self))]
    pub async fn execute(&self) -> usize {
        self.engine.clear().await
    }
}

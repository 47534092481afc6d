use std::sync::Arc;

use ch_core::EntryId;
use tracing::{debug, info};

use crate::engine::HistoryEngine;

pub struct TogglePin {
    engine: Arc<HistoryEngine>,
}

impl TogglePin {
    pub fn new(engine: Arc<HistoryEngine>) -> Self {
        Self { engine }
    }

    /// New pin state, or `None` when the entry is gone.
    #[tracing::instrument(
        name = "usecase.toggle_pin.execute",
        skip(self, id),
        fields(entry_id = %id)
    )]
    pub async fn execute(&self, id: &EntryId) -> Option<bool> {
        let pinned = self.engine.toggle_pin(id).await;
        match pinned {
            Some(pinned) => info!(pinned, "Toggled pin"),
            None => debug!("Toggle pin ignored for unknown entry"),
        }
        pinned
    }
}

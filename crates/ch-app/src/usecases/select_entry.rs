use std::sync::Arc;

use anyhow::{Context, Result};
use ch_core::ports::{ClipboardSinkPort, PasteSimulatorPort};
use ch_core::EntryId;
use tracing::{error, info, warn};

use crate::engine::HistoryEngine;

/// Re-apply a past entry to the system clipboard.
///
/// # Behavior
/// - Writes the entry to the clipboard sink
/// - When auto-paste is enabled, sends the paste keystroke afterwards
/// - Unknown ids write nothing and return `Ok(false)`
///
/// The write moves the clipboard's change token, so the poller later
/// re-observes the content and the entry moves to the front of the history.
pub struct SelectEntry {
    engine: Arc<HistoryEngine>,
    sink: Arc<dyn ClipboardSinkPort>,
    paste: Arc<dyn PasteSimulatorPort>,
}

impl SelectEntry {
    pub fn new(
        engine: Arc<HistoryEngine>,
        sink: Arc<dyn ClipboardSinkPort>,
        paste: Arc<dyn PasteSimulatorPort>,
    ) -> Self {
        Self {
            engine,
            sink,
            paste,
        }
    }

    #[tracing::instrument(
        name = "usecase.select_entry.execute",
        skip(self, id),
        fields(entry_id = %id)
    )]
    pub async fn execute(&self, id: &EntryId) -> Result<bool> {
        let Some(entry) = self.engine.entry(id).await else {
            warn!("Selected entry no longer exists");
            return Ok(false);
        };

        if let Err(err) = self.sink.write(&entry) {
            error!(error = %format!("{err:#}"), "Failed to write entry to clipboard");
            return Err(err.context("write selected entry to clipboard"));
        }

        if self.engine.settings().await.auto_paste_enabled {
            let paste = Arc::clone(&self.paste);
            tokio::task::spawn_blocking(move || paste.paste())
                .await
                .context("paste task failed")?
                .inspect_err(|err| {
                    error!(error = %format!("{err:#}"), "Failed to send paste keystroke")
                })?;
            info!(kind = ?entry.kind(), "Selected entry and pasted");
        } else {
            info!(kind = ?entry.kind(), "Selected entry");
        }
        Ok(true)
    }
}

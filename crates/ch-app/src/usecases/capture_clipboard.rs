use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use ch_core::ports::{ClipboardChangeHandler, ContentNormalizerPort};
use ch_core::{ClipboardSnapshot, RecordOutcome};
use tracing::debug;

use crate::engine::HistoryEngine;

/// Turn a changed clipboard snapshot into a history entry.
///
/// # Behavior
/// - Normalizes the snapshot; rejected content is dropped silently
/// - Records the candidate, which deduplicates, evicts and persists
///
/// Registered as the poller's [`ClipboardChangeHandler`].
pub struct CaptureClipboard {
    normalizer: Arc<dyn ContentNormalizerPort>,
    engine: Arc<HistoryEngine>,
}

impl CaptureClipboard {
    pub fn new(normalizer: Arc<dyn ContentNormalizerPort>, engine: Arc<HistoryEngine>) -> Self {
        Self { normalizer, engine }
    }

    /// `None` when the normalizer rejected the snapshot.
    #[tracing::instrument(
        name = "usecase.capture_clipboard.execute",
        skip(self, snapshot),
        fields(tag = %snapshot.tag, size_bytes = snapshot.size_bytes())
    )]
    pub async fn execute(&self, snapshot: &ClipboardSnapshot) -> Option<RecordOutcome> {
        let Some(candidate) = self.normalizer.normalize(snapshot) else {
            debug!("Clipboard content rejected by normalizer");
            return None;
        };
        Some(self.engine.record(candidate).await)
    }
}

#[async_trait]
impl ClipboardChangeHandler for CaptureClipboard {
    async fn on_clipboard_changed(&self, snapshot: ClipboardSnapshot) -> Result<()> {
        self.execute(&snapshot).await;
        Ok(())
    }
}

//! Poller lifecycle as seen from the presentation layer.

use std::sync::Arc;

use ch_core::ports::{WatcherControlError, WatcherControlPort};
use tracing::info;

#[derive(Debug, thiserror::Error)]
#[error("clipboard watcher did not start")]
pub struct StartClipboardWatcherError(#[from] WatcherControlError);

#[derive(Debug, thiserror::Error)]
#[error("clipboard watcher did not stop")]
pub struct StopClipboardWatcherError(#[from] WatcherControlError);

/// Begin polling. Starting a running watcher restarts its cadence; there is
/// never more than one schedule.
pub struct StartClipboardWatcher {
    watcher_control: Arc<dyn WatcherControlPort>,
}

impl StartClipboardWatcher {
    pub fn new(watcher_control: Arc<dyn WatcherControlPort>) -> Self {
        Self { watcher_control }
    }

    #[tracing::instrument(name = "usecase.start_clipboard_watcher.execute", skip_all)]
    pub async fn execute(&self) -> Result<(), StartClipboardWatcherError> {
        let was_running = self.watcher_control.is_running();
        self.watcher_control.start_watcher().await?;
        info!(restarted = was_running, "Clipboard watcher running");
        Ok(())
    }
}

/// Halt polling. A tick already running completes; history stays in memory
/// and on disk.
pub struct StopClipboardWatcher {
    watcher_control: Arc<dyn WatcherControlPort>,
}

impl StopClipboardWatcher {
    pub fn new(watcher_control: Arc<dyn WatcherControlPort>) -> Self {
        Self { watcher_control }
    }

    #[tracing::instrument(name = "usecase.stop_clipboard_watcher.execute", skip_all)]
    pub async fn execute(&self) -> Result<(), StopClipboardWatcherError> {
        if !self.watcher_control.is_running() {
            return Ok(());
        }
        self.watcher_control.stop_watcher().await?;
        info!("Clipboard watcher stopped");
        Ok(())
    }
}

use async_trait::async_trait;

/// Port for controlling the clipboard poller lifecycle.
///
/// # Behavior
/// - `start_watcher()` restarts the cadence when already running; it never
///   runs two schedules.
/// - `stop_watcher()` is a no-op when not running.
#[async_trait]
pub trait WatcherControlPort: Send + Sync {
    async fn start_watcher(&self) -> Result<(), WatcherControlError>;

    async fn stop_watcher(&self) -> Result<(), WatcherControlError>;

    fn is_running(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherControlError {
    #[error("failed to start clipboard poller: {0}")]
    StartFailed(String),

    #[error("failed to stop clipboard poller: {0}")]
    StopFailed(String),
}

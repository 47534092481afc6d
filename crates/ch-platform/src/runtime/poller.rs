//! Clipboard poller
//!
//! Periodically compares the clipboard source's change token with the last one
//! seen and hands changed content to a [`ClipboardChangeHandler`].
//!
//! ```text
//! ClipboardSourcePort
//!      ↓ (change token differs)
//! ClipboardPoller   (this module)
//!      ↓ ClipboardSnapshot
//! ClipboardChangeHandler  (application layer)
//! ```
//!
//! The token comparison is the only debounce: two changes between ticks are
//! observed as one, and the intermediate content is never seen.
//!
//! ## Lifecycle
//!
//! `start()` spawns one task ticking on `interval`; calling it again cancels
//! that task and restarts the cadence from zero. `stop()` cancels the task
//! and is a no-op when idle. A tick already executing runs to completion.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use ch_core::ports::{
    ClipboardChangeHandler, ClipboardSourcePort, WatcherControlError, WatcherControlPort,
};
use ch_core::ChangeToken;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// What a single [`ClipboardPoller::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Token equals the last one seen.
    Unchanged,
    /// First successful token read; remembered without delivering content.
    Baseline,
    /// Token moved but there was nothing to deliver (empty clipboard or a
    /// failed read).
    Skipped,
    /// A snapshot was handed to the change handler.
    Delivered,
}

struct PollerCore {
    source: Arc<dyn ClipboardSourcePort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    last_token: Mutex<Option<ChangeToken>>,
}

impl PollerCore {
    fn last_token(&self) -> MutexGuard<'_, Option<ChangeToken>> {
        self.last_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn tick(&self) -> TickOutcome {
        let token = match self.source.current_change_token() {
            Ok(token) => token,
            Err(err) => {
                debug!(error = %err, "Clipboard change token unavailable");
                return TickOutcome::Skipped;
            }
        };

        {
            let mut last = self.last_token();
            match *last {
                Some(previous) if previous == token => return TickOutcome::Unchanged,
                None => {
                    *last = Some(token);
                    return TickOutcome::Baseline;
                }
                Some(_) => *last = Some(token),
            }
        }

        let snapshot = match self.source.read_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return TickOutcome::Skipped,
            Err(err) => {
                debug!(error = %err, token = %token, "Failed to read changed clipboard");
                return TickOutcome::Skipped;
            }
        };

        debug!(
            token = %token,
            tag = %snapshot.tag,
            size_bytes = snapshot.size_bytes(),
            "Clipboard changed"
        );
        if let Err(err) = self.handler.on_clipboard_changed(snapshot).await {
            warn!(error = %format!("{err:#}"), "Failed to handle clipboard change");
        }
        TickOutcome::Delivered
    }
}

struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct ClipboardPoller {
    core: Arc<PollerCore>,
    interval: Duration,
    task: Mutex<Option<RunningTask>>,
}

impl ClipboardPoller {
    /// Reads the current token as the baseline, so content already on the
    /// clipboard is not reported.
    pub fn new(
        source: Arc<dyn ClipboardSourcePort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        interval: Duration,
    ) -> Self {
        let baseline = match source.current_change_token() {
            Ok(token) => Some(token),
            Err(err) => {
                debug!(error = %err, "No baseline clipboard token, first tick will set it");
                None
            }
        };
        Self {
            core: Arc::new(PollerCore {
                source,
                handler,
                last_token: Mutex::new(baseline),
            }),
            interval,
            task: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one check immediately, outside the schedule.
    pub async fn tick(&self) -> TickOutcome {
        self.core.tick().await
    }

    /// Start ticking, restarting the cadence if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), WatcherControlError> {
        let runtime =
            Handle::try_current().map_err(|e| WatcherControlError::StartFailed(e.to_string()))?;

        let mut task = self.lock_task();
        if let Some(previous) = task.take() {
            previous.cancel.cancel();
            debug!("Restarting clipboard poller");
        }

        let cancel = CancellationToken::new();
        let handle = runtime.spawn(run_schedule(
            Arc::clone(&self.core),
            self.interval,
            cancel.clone(),
        ));
        *task = Some(RunningTask { cancel, handle });

        info!(interval_ms = self.interval.as_millis() as u64, "Clipboard poller started");
        Ok(())
    }

    /// Stop ticking. No-op when not running.
    pub fn stop(&self) {
        match self.lock_task().take() {
            Some(task) => {
                task.cancel.cancel();
                info!("Clipboard poller stopped");
            }
            None => debug!("Clipboard poller already stopped"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock_task()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    fn lock_task(&self) -> MutexGuard<'_, Option<RunningTask>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ClipboardPoller {
    fn drop(&mut self) {
        if let Some(task) = self.lock_task().take() {
            task.cancel.cancel();
        }
    }
}

async fn run_schedule(core: Arc<PollerCore>, period: Duration, cancel: CancellationToken) {
    // First tick one full period after start.
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                core.tick().await;
            }
        }
    }
}

#[async_trait]
impl WatcherControlPort for ClipboardPoller {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        self.start()
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        self.stop();
        Ok(())
    }

    fn is_running(&self) -> bool {
        ClipboardPoller::is_running(self)
    }
}

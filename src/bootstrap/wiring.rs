//! # Dependency Injection
//!
//! The only place that depends on `ch-infra`, `ch-platform` and `ch-app` at
//! once. It assembles adapters behind ports and hands back what the runtime
//! needs. No history decisions happen here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ch_app::usecases::CaptureClipboard;
use ch_app::{Activation, AppDeps, HistoryEngine};
use ch_core::app_dirs::AppDirs;
use ch_core::ports::{ClipboardSinkPort, ClipboardSourcePort, HotkeyRegistrarPort};
use ch_core::HotkeySpec;
use ch_infra::{
    Blake3Hasher, ContentNormalizer, FileKeyValueStore, SystemClock, TracingPersistenceEvents,
};
use ch_platform::{
    ClipboardPoller, EnigoPasteSimulator, InMemoryClipboard, InMemoryHotkeyRegistrar,
    SystemClipboard,
};
use tracing::{info, warn};

use super::config::{AppConfig, ClipboardBackend};

/// `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory initialization failed: {0}")]
    DataDirInit(String),
}

/// Everything the runtime holds on to after wiring.
pub struct AppServices {
    pub activation: Arc<Activation>,
    pub poller: Arc<ClipboardPoller>,
    pub hotkeys: Arc<InMemoryHotkeyRegistrar>,
    pub hotkey: HotkeySpec,
    pub history_file: PathBuf,
}

impl AppServices {
    pub fn hotkey_registrar(&self) -> Arc<dyn HotkeyRegistrarPort> {
        self.hotkeys.clone()
    }
}

fn poll_interval(config: &AppConfig) -> Duration {
    Duration::from_millis(config.poller.interval_ms).max(MIN_POLL_INTERVAL)
}

fn hotkey_spec(config: &AppConfig) -> HotkeySpec {
    match config.hotkey.binding.parse() {
        Ok(spec) => spec,
        Err(err) => {
            let fallback = HotkeySpec::default();
            warn!(
                binding = %config.hotkey.binding,
                error = %err,
                fallback = %fallback,
                "Invalid hotkey binding, using default"
            );
            fallback
        }
    }
}

fn create_data_dir(dirs: &AppDirs) -> WiringResult<()> {
    std::fs::create_dir_all(&dirs.app_data_root).map_err(|e| {
        WiringError::DataDirInit(format!(
            "Failed to create data directory {}: {}",
            dirs.app_data_root.display(),
            e
        ))
    })
}

struct ClipboardLayer {
    source: Arc<dyn ClipboardSourcePort>,
    sink: Arc<dyn ClipboardSinkPort>,
}

fn create_clipboard_layer(backend: ClipboardBackend) -> ClipboardLayer {
    let in_memory = || {
        let clipboard = Arc::new(InMemoryClipboard::new());
        ClipboardLayer {
            source: clipboard.clone(),
            sink: clipboard,
        }
    };

    match backend {
        ClipboardBackend::InMemory => in_memory(),
        ClipboardBackend::System => match SystemClipboard::new() {
            Ok(clipboard) => {
                let clipboard = Arc::new(clipboard);
                ClipboardLayer {
                    source: clipboard.clone(),
                    sink: clipboard,
                }
            }
            Err(err) => {
                warn!(error = %err, "System clipboard unavailable, using in-memory clipboard");
                in_memory()
            }
        },
    }
}

/// Assemble the application.
///
/// 1. Ensure the data directory exists
/// 2. Build the history engine over the JSON file store
/// 3. Build the poller feeding [`CaptureClipboard`]
/// 4. Hand the poller to [`Activation`] as its watcher control
pub fn wire_dependencies(config: &AppConfig, dirs: &AppDirs) -> WiringResult<AppServices> {
    create_data_dir(dirs)?;
    let history_file = dirs.history_file();

    let engine = Arc::new(HistoryEngine::new(
        Arc::new(FileKeyValueStore::new(&history_file)),
        Arc::new(SystemClock),
        Arc::new(TracingPersistenceEvents),
    ));

    let clipboard = create_clipboard_layer(config.clipboard.backend);
    let capture = Arc::new(CaptureClipboard::new(
        Arc::new(ContentNormalizer::new(Arc::new(Blake3Hasher))),
        engine.clone(),
    ));
    let interval = poll_interval(config);
    let poller = Arc::new(ClipboardPoller::new(clipboard.source, capture, interval));

    let activation = Arc::new(Activation::new(
        engine,
        AppDeps {
            clipboard_sink: clipboard.sink,
            paste: Arc::new(EnigoPasteSimulator::new()),
            watcher_control: poller.clone(),
        },
    ));

    info!(
        history_file = %history_file.display(),
        interval_ms = interval.as_millis() as u64,
        "Dependencies wired"
    );

    Ok(AppServices {
        activation,
        poller,
        hotkeys: Arc::new(InMemoryHotkeyRegistrar::new()),
        hotkey: hotkey_spec(config),
        history_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::config::{ClipboardConfig, HotkeyConfig, PollerConfig};

    fn headless_config() -> AppConfig {
        AppConfig {
            clipboard: ClipboardConfig {
                backend: ClipboardBackend::InMemory,
            },
            ..AppConfig::default()
        }
    }

    fn config_with(interval_ms: u64, binding: &str) -> AppConfig {
        AppConfig {
            poller: PollerConfig { interval_ms },
            hotkey: HotkeyConfig {
                binding: binding.to_string(),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_wiring_error_display() {
        let err = WiringError::DataDirInit("permission denied".to_string());
        assert!(err.to_string().contains("Data directory initialization"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_zero_interval_is_raised_to_minimum() {
        assert_eq!(poll_interval(&config_with(0, "cmd+shift+v")), MIN_POLL_INTERVAL);
        assert_eq!(
            poll_interval(&config_with(750, "cmd+shift+v")),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn test_invalid_hotkey_falls_back_to_default() {
        assert_eq!(hotkey_spec(&config_with(500, "cmd++")), HotkeySpec::default());
        assert_eq!(
            hotkey_spec(&config_with(500, "ctrl+alt+h")).to_string(),
            "ctrl+alt+h"
        );
    }

    #[tokio::test]
    async fn test_wire_dependencies_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let dirs = AppDirs {
            app_data_root: data_dir.clone(),
        };

        let services =
            wire_dependencies(&headless_config(), &dirs).unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(services.history_file, data_dir.join("history.json"));
        assert_eq!(services.poller.interval(), Duration::from_millis(500));
        assert_eq!(services.hotkey, HotkeySpec::default());
        assert!(services.activation.snapshot().await.items.is_empty());
    }

    #[tokio::test]
    async fn test_wired_history_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let config = headless_config();
        let dirs = AppDirs {
            app_data_root: dir.path().to_path_buf(),
        };

        let first = wire_dependencies(&config, &dirs).unwrap();
        first.activation.load_persisted().await;
        first.activation.set_max_items(12).await;

        let second = wire_dependencies(&config, &dirs).unwrap();
        let snapshot = second.activation.load_persisted().await;
        assert_eq!(snapshot.max_items, 12);
    }
}

//! # Configuration Loader
//!
//! Reads `config.toml` into [`AppConfig`]. Pure data loading: missing fields
//! take their serde defaults, nothing is validated here. History settings
//! (`maxItems`, auto-paste) are not part of this file; they live in the
//! persisted history record.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ch_core::app_dirs::AppDirs;
use ch_core::hotkey::DEFAULT_HOTKEY;
use ch_platform::runtime::DEFAULT_POLL_INTERVAL;
use serde::Deserialize;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CLIPBOARD_HISTORY_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub poller: PollerConfig,
    pub clipboard: ClipboardConfig,
    pub storage: StorageConfig,
    pub hotkey: HotkeyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

/// Which clipboard the poller and write-back use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardBackend {
    /// The OS clipboard; wiring falls back to the in-memory one when no
    /// clipboard is reachable (headless sessions).
    #[default]
    System,
    InMemory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub backend: ClipboardBackend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Replaces the platform data directory for history and logs.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub binding: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            binding: DEFAULT_HOTKEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Platform directories with the `[storage] data_dir` override applied.
    /// The result holds `history.json` and `logs/`.
    pub fn resolve_dirs(&self, platform: &AppDirs) -> AppDirs {
        match &self.storage.data_dir {
            Some(dir) => AppDirs {
                app_data_root: dir.clone(),
            },
            None => platform.clone(),
        }
    }
}

/// `$CLIPBOARD_HISTORY_CONFIG`, else `config.toml` in the data directory.
pub fn resolve_config_path(app_dirs: &AppDirs) -> PathBuf {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_dirs.config_file(),
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Like [`load_config`], but a missing file is `Ok(None)`.
pub fn load_config_if_present(config_path: &Path) -> anyhow::Result<Option<AppConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    load_config(config_path).map(Some)
}

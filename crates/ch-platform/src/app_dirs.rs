use std::path::PathBuf;

use ch_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "clipboard-history";

/// Environment variable selecting a profile; each profile gets its own data
/// directory so side-by-side instances do not share history.
pub const PROFILE_ENV: &str = "CH_PROFILE";

fn app_dir_name(profile: Option<&str>) -> String {
    match profile {
        Some(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Resolves `<data_local_dir>/clipboard-history[-<profile>]` via `dirs`.
#[derive(Debug, Default)]
pub struct DirsAppDirsAdapter {
    base_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve under `base` instead of the system data-local directory.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_override: Some(base),
        }
    }

    fn base_dir(&self) -> Option<PathBuf> {
        self.base_override.clone().or_else(dirs::data_local_dir)
    }

    fn dirs_for_profile(&self, profile: Option<&str>) -> Result<AppDirs, AppDirsError> {
        let base = self.base_dir().ok_or(AppDirsError::DataLocalDirUnavailable)?;
        Ok(AppDirs {
            app_data_root: base.join(app_dir_name(profile)),
        })
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let profile = std::env::var(PROFILE_ENV).ok();
        self.dirs_for_profile(profile.as_deref())
    }
}

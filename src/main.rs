mod bootstrap;
mod presentation;

use std::time::Duration;

use anyhow::Context;
use ch_core::ports::AppDirsPort;
use ch_platform::DirsAppDirsAdapter;
use tracing::{error, info};

use bootstrap::{
    init_tracing_subscriber, load_config_if_present, resolve_config_path, run_app,
    wire_dependencies, AppConfig,
};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

fn main() -> anyhow::Result<()> {
    let platform_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application directories")?;

    // Config errors are reported once tracing is up.
    let config_path = resolve_config_path(&platform_dirs);
    let (config, config_error) = match load_config_if_present(&config_path) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let dirs = config.resolve_dirs(&platform_dirs);

    init_tracing_subscriber(&dirs.logs_dir()).context("Failed to initialize tracing")?;

    if let Some(err) = config_error {
        error!(error = ?err, path = %config_path.display(), "Config not loaded, using defaults");
    }
    info!(
        data_dir = %dirs.app_data_root.display(),
        config = %config_path.display(),
        "Starting clipboard-history"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let result: anyhow::Result<()> = runtime.block_on(async {
        let services = wire_dependencies(&config, &dirs).context("Failed to wire dependencies")?;
        run_app(services).await
    });

    // A pending stdin read lives on a blocking thread and would hold a plain drop.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

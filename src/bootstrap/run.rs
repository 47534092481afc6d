//! Application lifecycle: start, serve the presenter, shut down.

use std::sync::Arc;

use anyhow::Context;
use ch_core::ports::HotkeyRegistrarPort;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::wiring::AppServices;
use crate::presentation::ConsolePresenter;

/// Forward hotkey presses into `tx`. A closed channel drops the press.
fn connect_hotkey(registrar: &dyn HotkeyRegistrarPort, tx: mpsc::UnboundedSender<()>) {
    registrar.on_triggered(Arc::new(move || {
        let _ = tx.send(());
    }));
}

/// Run until Ctrl-C, `quit`, or stdin closes.
///
/// Startup loads persisted history and starts the poller. A hotkey that
/// cannot be registered is logged and the application keeps running without
/// it.
pub async fn run_app(services: AppServices) -> anyhow::Result<()> {
    let snapshot = services
        .activation
        .start()
        .await
        .context("Failed to start clipboard watcher")?;
    info!(
        entries = snapshot.items.len(),
        max_items = snapshot.max_items,
        auto_paste = snapshot.auto_paste_enabled,
        interval_ms = services.poller.interval().as_millis() as u64,
        history_file = %services.history_file.display(),
        "clipboard-history started"
    );

    let registrar = services.hotkey_registrar();
    let (hotkey_tx, hotkey_rx) = mpsc::unbounded_channel();
    connect_hotkey(registrar.as_ref(), hotkey_tx);
    if let Err(err) = registrar.register(&services.hotkey) {
        warn!(error = %err, hotkey = %services.hotkey, "Hotkey not registered");
    }

    let shutdown = CancellationToken::new();
    let presenter = ConsolePresenter::new(services.activation.clone(), services.hotkeys.clone());
    let presenter_task = tokio::spawn(presenter.run(hotkey_rx, shutdown.clone()));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                warn!(error = %err, "Failed to listen for Ctrl-C");
            }
            info!("Shutdown requested");
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }

    if let Err(err) = presenter_task.await {
        error!(error = %err, "Presenter task failed");
    }

    registrar.unregister();
    if let Err(err) = services.activation.stop().await {
        warn!(error = ?err, "Failed to stop clipboard watcher");
    }
    info!("clipboard-history stopped");
    Ok(())
}

//! # Application Dependencies
//!
//! Parameter grouping for [`crate::Activation`] construction. Not a builder:
//! no defaults, no hidden logic.

use std::sync::Arc;

use ch_core::ports::{ClipboardSinkPort, PasteSimulatorPort, WatcherControlPort};

/// Ports the presentation-facing use cases need besides the engine.
pub struct AppDeps {
    // Clipboard write-back
    pub clipboard_sink: Arc<dyn ClipboardSinkPort>,
    pub paste: Arc<dyn PasteSimulatorPort>,

    // Poller lifecycle
    pub watcher_control: Arc<dyn WatcherControlPort>,
}

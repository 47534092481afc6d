//! Hotkey registrar port.
//!
//! The OS-level global hotkey is an external collaborator of the presentation
//! layer. The history engine never depends on it.

use std::sync::Arc;

use thiserror::Error;

use crate::hotkey::HotkeySpec;

pub type HotkeyCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("hotkey {0} is already taken by another application")]
    Unavailable(String),

    #[error("hotkey registration failed: {0}")]
    Registration(String),
}

pub trait HotkeyRegistrarPort: Send + Sync {
    /// Register `spec`, replacing any previous registration.
    fn register(&self, spec: &HotkeySpec) -> Result<(), HotkeyError>;

    /// Drop the current registration. Idempotent.
    fn unregister(&self);

    /// Callback invoked on every press of the registered hotkey.
    fn on_triggered(&self, callback: HotkeyCallback);
}

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use ch_core::ports::PasteSimulatorPort;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::debug;

/// Gap between key events so the target application registers the modifier.
const KEY_EVENT_GAP: Duration = Duration::from_millis(20);

/// Posts Cmd+V (macOS) or Ctrl+V (elsewhere) to the focused application.
///
/// A fresh `Enigo` is created per paste; the handle is not `Send` on every
/// platform.
#[derive(Debug, Default)]
pub struct EnigoPasteSimulator;

impl EnigoPasteSimulator {
    pub fn new() -> Self {
        Self
    }
}

impl PasteSimulatorPort for EnigoPasteSimulator {
    fn paste(&self) -> Result<()> {
        let mut enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("keystroke injection unavailable: {e}"))?;

        #[cfg(target_os = "macos")]
        let modifier = Key::Meta;
        #[cfg(not(target_os = "macos"))]
        let modifier = Key::Control;

        enigo
            .key(modifier, Direction::Press)
            .map_err(|e| anyhow!("press paste modifier: {e}"))?;
        thread::sleep(KEY_EVENT_GAP);

        let click = enigo.key(Key::Unicode('v'), Direction::Click);
        thread::sleep(KEY_EVENT_GAP);

        // Release the modifier even when the click failed.
        enigo
            .key(modifier, Direction::Release)
            .map_err(|e| anyhow!("release paste modifier: {e}"))?;
        click.map_err(|e| anyhow!("send paste key: {e}"))?;

        debug!("Sent paste keystroke");
        Ok(())
    }
}

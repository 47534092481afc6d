use anyhow::Result;

/// Sends the platform paste keystroke to the frontmost application.
pub trait PasteSimulatorPort: Send + Sync {
    fn paste(&self) -> Result<()>;
}

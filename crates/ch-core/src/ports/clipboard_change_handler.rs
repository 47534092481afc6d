//! Clipboard change handler port
//!
//! The poller (platform layer) calls this after it has read a changed
//! snapshot; the application layer implements it. The platform layer never
//! depends on the history engine directly.

use anyhow::Result;

use crate::clipboard::ClipboardSnapshot;

#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    async fn on_clipboard_changed(&self, snapshot: ClipboardSnapshot) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_change_handler_is_object_safe() {
        fn assert_object_safe(_handler: Option<&dyn ClipboardChangeHandler>) {}
        assert_object_safe(None);
    }
}

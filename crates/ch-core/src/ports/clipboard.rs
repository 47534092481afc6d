//! Clipboard ports - abstract the system clipboard.
//!
//! The engine polls: it asks for a change token on every tick and reads the
//! content only when the token moved. Both calls are fast, local and
//! synchronous.

use anyhow::Result;

use crate::clipboard::{ChangeToken, ClipboardSnapshot};
use crate::entry::Entry;

pub trait ClipboardSourcePort: Send + Sync {
    /// Token that changes whenever the clipboard content changes.
    fn current_change_token(&self) -> Result<ChangeToken>;

    /// Current content, or `None` when the clipboard holds nothing readable.
    fn read_snapshot(&self) -> Result<Option<ClipboardSnapshot>>;
}

pub trait ClipboardSinkPort: Send + Sync {
    /// Replace the clipboard contents with `entry`.
    ///
    /// Text entries are written as plain text; image entries as at least one
    /// image encoding other applications understand.
    fn write(&self, entry: &Entry) -> Result<()>;
}

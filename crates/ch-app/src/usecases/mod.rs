//! Use cases over the history engine and the ports.
pub mod capture_clipboard;
pub mod clear_history;
pub mod list_entries;
pub mod load_history;
pub mod select_entry;
pub mod settings;
pub mod toggle_pin;
pub mod watcher;

pub use capture_clipboard::CaptureClipboard;
pub use clear_history::ClearHistory;
pub use list_entries::ListEntries;
pub use load_history::LoadHistory;
pub use select_entry::SelectEntry;
pub use settings::{SetAutoPaste, SetMaxItems};
pub use toggle_pin::TogglePin;
pub use watcher::{
    StartClipboardWatcher, StartClipboardWatcherError, StopClipboardWatcher,
    StopClipboardWatcherError,
};

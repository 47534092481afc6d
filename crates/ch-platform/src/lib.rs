pub mod adapters;
pub mod app_dirs;
pub mod clipboard;
pub mod hotkey;
pub mod paste;
pub mod runtime;

pub use adapters::InMemoryClipboard;
pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::SystemClipboard;
pub use hotkey::InMemoryHotkeyRegistrar;
pub use paste::EnigoPasteSimulator;
pub use runtime::ClipboardPoller;

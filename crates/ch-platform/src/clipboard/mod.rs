#[cfg(target_os = "macos")]
mod pasteboard;
mod system;

pub use system::SystemClipboard;

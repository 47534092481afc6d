//! Port interfaces for the application layer
//!
//! Ports define the contract between the history logic and the outside world:
//! the system clipboard, durable storage, the clock, keystroke injection and
//! hotkey registration. Infrastructure and platform crates implement them; the
//! application layer depends only on these traits.
//!
//! ## Port Placement Guidelines
//!
//! A trait belongs here when it represents a capability the history engine
//! needs and it is implemented outside of `ch-core`. Helper traits used by a
//! single module stay in that module.

pub mod app_dirs;
mod clipboard;
mod clipboard_change_handler;
mod clock;
pub mod errors;
mod hash;
pub mod hotkey;
mod normalizer;
mod paste;
mod persistence_events;
mod storage;
pub mod watcher_control;

pub use app_dirs::AppDirsPort;
pub use clipboard::{ClipboardSinkPort, ClipboardSourcePort};
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::ClockPort;
pub use errors::AppDirsError;
pub use hash::ContentHashPort;
pub use hotkey::{HotkeyCallback, HotkeyError, HotkeyRegistrarPort};
pub use normalizer::ContentNormalizerPort;
pub use paste::PasteSimulatorPort;
pub use persistence_events::PersistenceEventsPort;
pub use storage::KeyValueStorePort;
pub use watcher_control::{WatcherControlError, WatcherControlPort};

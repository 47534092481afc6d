mod in_memory_clipboard;

pub use in_memory_clipboard::InMemoryClipboard;

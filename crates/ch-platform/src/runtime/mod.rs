mod poller;

pub use poller::{ClipboardPoller, TickOutcome, DEFAULT_POLL_INTERVAL};

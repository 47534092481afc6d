use ch_core::ports::PersistenceEventsPort;
use tracing::{debug, warn};

/// Reports persistence outcomes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPersistenceEvents;

impl PersistenceEventsPort for TracingPersistenceEvents {
    fn persisted(&self, slot: &str) {
        debug!(slot, "Persisted history slot");
    }

    fn persist_failed(&self, slot: &str, error: &anyhow::Error) {
        warn!(slot, error = %format!("{error:#}"), "Failed to persist history slot");
    }

    fn load_failed(&self, slot: &str, error: &anyhow::Error) {
        warn!(
            slot,
            error = %format!("{error:#}"),
            "Failed to load history slot, falling back to defaults"
        );
    }
}

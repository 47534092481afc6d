/// Observability hook for best-effort persistence.
///
/// Persistence failures never propagate out of the engine; they are reported
/// here instead.
pub trait PersistenceEventsPort: Send + Sync {
    fn persisted(&self, slot: &str);
    fn persist_failed(&self, slot: &str, error: &anyhow::Error);
    fn load_failed(&self, slot: &str, error: &anyhow::Error);
}

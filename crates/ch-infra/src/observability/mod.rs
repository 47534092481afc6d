mod persistence_events;

pub use persistence_events::TracingPersistenceEvents;

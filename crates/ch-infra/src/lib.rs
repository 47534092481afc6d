pub mod clipboard;
pub mod hashing;
pub mod observability;
pub mod storage;
pub mod time;

pub use clipboard::ContentNormalizer;
pub use hashing::Blake3Hasher;
pub use observability::TracingPersistenceEvents;
pub use storage::FileKeyValueStore;
pub use time::SystemClock;

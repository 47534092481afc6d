pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config_if_present, resolve_config_path, AppConfig};
pub use run::run_app;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::wire_dependencies;

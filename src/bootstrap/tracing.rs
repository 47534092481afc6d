//! Tracing configuration for clipboard-history
//!
//! Every crate in the workspace logs through `tracing` macros. This module
//! installs the single global subscriber: env-filter, a stdout layer and a
//! non-blocking file layer under the data directory's `logs/`.
//!
//! ## Output
//!
//! `2026-01-15 10:30:45.123 INFO [file.rs:42] [target] message`
//!
//! `RUST_LOG` overrides the default directives.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, registry};

const LOG_FILE_NAME: &str = "clipboard-history.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives.
///
/// - **Development**: debug for everything
/// - **Production**: info for everything
/// - `arboard` and `enigo` stay at warn; they are chatty at debug
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "arboard=warn".to_string(),
        "enigo=warn".to_string(),
        if is_dev {
            "ch_platform=debug"
        } else {
            "ch_platform=info"
        }
        .to_string(),
        if is_dev { "ch_infra=debug" } else { "ch_infra=info" }.to_string(),
    ]
}

/// Install the global tracing subscriber.
///
/// File logging goes to `<logs_dir>/clipboard-history.log`. If the directory
/// cannot be created the subscriber falls back to stdout only and says so on
/// stderr.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(logs_dir: &Path) -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(logs_dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    let stdout_layer = fmt_layer(stdout_writer, cfg!(not(test)));
    let file_layer = file_writer.map(|writer| fmt_layer(writer, false));

    let subscriber = registry().with(env_filter).with(stdout_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

type FmtLayer<S, W> = fmt::Layer<S, DefaultFields, Format<Full, fmt::time::ChronoUtc>, W>;

/// Shared line format for every sink: timestamp, level, file:line, target.
fn fmt_layer<S, W>(writer: W, ansi: bool) -> FmtLayer<S, W>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;
    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"arboard=warn".to_string()));
        assert!(dev_directives.contains(&"ch_platform=debug".to_string()));
        assert!(dev_directives.contains(&"ch_infra=debug".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"enigo=warn".to_string()));
        assert!(prod_directives.contains(&"ch_platform=info".to_string()));
        assert!(prod_directives.contains(&"ch_infra=info".to_string()));
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        for is_dev in [true, false] {
            let joined = build_filter_directives(is_dev).join(",");
            assert!(tracing_subscriber::EnvFilter::try_new(&joined).is_ok());
        }
    }
}

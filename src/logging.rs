//! Log setup.
//!
//! Logs go to `gt.log` in the data root, never to the terminal. The filter
//! comes from `RUST_LOG`, then `GT_LOG`, then defaults to `warn`.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Error;

/// Environment variable consulted when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "GT_LOG";

fn env_filter() -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());

    builder
        .try_from_env()
        .or_else(|_| builder.with_env_var(LOG_ENV).from_env())
        .unwrap_or_else(|_| EnvFilter::new(LevelFilter::WARN.to_string()))
}

/// Install the global subscriber writing to `log_path`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(log_path: &Path) -> Result<(), Error> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| {
            Error::Config(format!(
                "Failed to open log file {}: {e}",
                log_path.display()
            ))
        })?;

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {e}")))?;

    debug!(path = %log_path.display(), "logging initialized");
    Ok(())
}

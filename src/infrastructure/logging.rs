//! File and console logging
//!
//! Writes logs under the configured directory, separated by log type:
//! - <dir>/main - All application logs (JSON)
//! - <dir>/error - Error and warning logs only
//!
//! Console output is always enabled. `RUST_LOG` overrides the configured level.

use crate::infrastructure::config::LoggingConfig;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize logging
///
/// Returns the appender guards, which must be kept alive for the duration of
/// the program. Empty when file logging is disabled.
/// # Errors
/// Returns error if the log directories cannot be created.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<Vec<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    if !config.file {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer())
            .init();
        return Ok(Vec::new());
    }

    let mut guards = Vec::new();

    // Main log - all logs
    let (main_appender, main_guard) = create_appender(&config.dir, "main")?;
    guards.push(main_guard);

    // Error log - ERROR and WARN only
    let (error_appender, error_guard) = create_appender(&config.dir, "error")?;
    guards.push(error_guard);

    let main_layer = tracing_subscriber::fmt::layer()
        .with_writer(main_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json();

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(filter)
        .with(main_layer)
        .with(error_layer)
        .with(console_layer())
        .init();

    tracing::info!(dir = %config.dir.display(), "Logging system initialized");

    Ok(guards)
}

/// Console layer for development
fn console_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
}

/// Create a daily rolling file appender in `<dir>/<name>`
fn create_appender(dir: &Path, name: &str) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    let dir = dir.join(name);
    fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, dir, name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Log macro helpers for specific log types
#[macro_export]
macro_rules! log_window {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "window", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_engine {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "engine", $level, $($arg)+)
    };
}

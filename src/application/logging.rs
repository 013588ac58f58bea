//! # Logging Setup
//!
//! Installs the global `tracing` subscriber: a console layer on stdout plus a plain-text
//! session log written through a non-blocking file appender.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::config::LoggingConfig;

/// Filter from `RUST_LOG`, falling back to the configured directives when it is unset
/// or unparsable.
pub fn filter_from(rust_log: Option<&str>, config: &LoggingConfig) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.filter))
}

/// Creates the log directory if needed and removes the previous session log.
/// Returns the directory the appender should write into.
pub fn prepare_log_dir(config: &LoggingConfig) -> Result<PathBuf> {
    let dir = PathBuf::from(&config.dir);
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    // Clear previous session log
    let log_path = dir.join(&config.file);
    if log_path.exists() {
        fs::remove_file(&log_path)
            .with_context(|| format!("Failed to clear {}", log_path.display()))?;
    }

    Ok(dir)
}

/// Initializes logging. The returned guard flushes the file writer on drop and must
/// live as long as the process.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = prepare_log_dir(config)?;

    let file_appender = tracing_appender::rolling::never(&dir, &config.file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(filter_from(rust_log.as_deref(), config))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

//! Tracing setup
//!
//! The TUI owns the terminal, so it logs to a file; line-mode commands log
//! to stderr.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "frantic_five=info";

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Build the filter from an explicit level, `RUST_LOG`, or the default
///
/// # Errors
/// Returns an error if `level` is not a valid filter directive.
pub fn filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(format!("frantic_five={level}"))
            .with_context(|| format!("invalid log level: {level}")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())),
    }
}

/// Install the global subscriber
///
/// # Errors
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(level: Option<&str>, target: &LogTarget) -> Result<()> {
    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    tracing_subscriber::registry()
        .with(filter(level)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(matches!(target, LogTarget::Stderr)),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

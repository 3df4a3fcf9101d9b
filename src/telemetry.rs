//! Log setup. The terminal is owned by the UI, so logs go to a file.
use anyhow::{Context, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber appending to `path`, filtered by `RUST_LOG`
/// (default `info`).
///
/// # Errors
/// Returns an error if the file cannot be opened or a global subscriber is
/// already installed.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

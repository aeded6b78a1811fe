//! File logging.
//!
//! The TUI owns stdout, so tracing output goes to
//! `<data_dir>/datascout/logs/datascout.log`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Overrides the configured level, e.g. `DATASCOUT_LOG=datascout=debug`
pub const LOG_ENV: &str = "DATASCOUT_LOG";

/// Install the global subscriber. Returns the log path, or `None` when
/// logging could not be set up (startup continues either way).
pub fn init(level: &str) -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("datascout").join("logs");
    match init_in(&dir, level) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    }
}

fn init_in(dir: &Path, level: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let path = dir.join("datascout.log");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .with_context(|| format!("Failed to open {:?}", path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    let filter = build_filter(std::env::var(LOG_ENV).ok(), level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized to {:?}", path);
    Ok(path)
}

fn build_filter(env: Option<String>, level: &str) -> Result<EnvFilter> {
    let directive = match env {
        Some(d) if !d.trim().is_empty() => d,
        _ => format!("datascout={}", level),
    };
    EnvFilter::builder()
        .parse(&directive)
        .with_context(|| format!("Invalid log filter {:?}", directive))
}

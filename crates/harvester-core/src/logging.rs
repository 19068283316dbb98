//! Tracing setup for the harvester binary.
//!
//! Containers that only collect stderr pick [`LogTarget::Stderr`] (or set
//! `HARVESTER_LOG=stderr`); everything else appends to a file in the XDG
//! state dir. If that file cannot be opened we log to stderr instead.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,harvester=debug,harvester_core=debug";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

impl LogTarget {
    /// `HARVESTER_LOG=stderr` selects stderr; anything else the state file.
    pub fn from_env() -> Self {
        match std::env::var("HARVESTER_LOG") {
            Ok(v) if v.eq_ignore_ascii_case("stderr") => LogTarget::Stderr,
            _ => LogTarget::File,
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/harvester/harvester.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harvester")?;
    Ok(xdg_dirs.get_state_home().join("harvester").join("harvester.log"))
}

/// Install the global subscriber for `target`.
pub fn init(target: LogTarget) {
    if target == LogTarget::File {
        match init_file() {
            Ok(path) => {
                tracing::info!("harvester logging to {}", path.display());
                return;
            }
            Err(e) => {
                init_stderr();
                tracing::warn!("file logging unavailable, using stderr: {:#}", e);
                return;
            }
        }
    }
    init_stderr();
}

/// Append to the state log file. Errors if the file cannot be opened or a
/// subscriber is already installed.
pub fn init_file() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(path)
}

/// Log to stderr. A no-op if a subscriber is already installed (tests).
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

//! File logging
//!
//! The terminal belongs to the UI, so log records go to a file in the
//! config directory. `RUST_LOG` controls the level (default `info`).

use crate::config::Config;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::PathBuf;

const LOG_FILE: &str = "commissions-tui.log";

pub fn log_path() -> Option<PathBuf> {
    Config::config_dir().map(|dir| dir.join(LOG_FILE))
}

/// Install the global logger. Without a home directory logging stays off.
pub fn init() -> Result<Option<PathBuf>> {
    let Some(path) = log_path() else {
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("installing logger")?;

    Ok(Some(path))
}

//! Tracing setup
//!
//! CLI mode logs to stderr so stdout stays clean for `--json`. TUI mode owns
//! the terminal, so logs go to a file under the cache directory instead.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `podtui=debug`)
pub const LOG_ENV: &str = "PODTUI_LOG";

/// Filter used when `PODTUI_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log file for TUI sessions (~/.cache/podtui/podtui.log)
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("podtui").join("podtui.log"))
}

/// Log to stderr
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to the session file; returns where logs are written
pub fn init_tui() -> Result<Option<PathBuf>> {
    let Some(path) = log_path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file: File = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(Some(path))
}

// Tracing setup.
// The terminal belongs to the UI, so log lines go to a file in the data directory.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ConsoleError, Result};
use crate::files;

const LOG_FILE: &str = "tripdesk.log";

fn open_log_file() -> Result<Option<(PathBuf, File)>> {
    let Some(dir) = files::log_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok(Some((path, file)))
}

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
/// Returns the log file path, or None when there is no data directory.
pub fn init(default_level: &str) -> Result<Option<PathBuf>> {
    let Some((path, file)) = open_log_file()? else {
        return Ok(None);
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConsoleError::Other(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(Some(path))
}

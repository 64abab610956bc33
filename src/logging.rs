use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::{PomoError, Result};

/// Install the global subscriber. Without a log file nothing is installed, so
/// the alternate screen never receives stray output.
pub fn init(settings: &Settings) -> Result<()> {
    let Some(path) = settings.log_file.as_deref() else {
        return Ok(());
    };

    let filter = build_filter(&settings.log_level)?;
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}

/// `level` is either a bare level ("debug") or a full directive list
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    let directives = if level.contains('=') {
        level.to_string()
    } else {
        format!("pomo={level}")
    };

    EnvFilter::try_new(&directives).map_err(|e| PomoError::LogFilter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

pub fn open_log_file(path: &Path) -> Result<File> {
    let to_err = |source| PomoError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)
}

use std::path::PathBuf;

use thiserror::Error;

/// Failures while setting up or tearing down the terminal session.
/// The timer itself has no error paths.
#[derive(Debug, Error)]
pub enum PomoError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open log file at {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid log filter '{filter}': {reason}")]
    LogFilter { filter: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PomoError>;

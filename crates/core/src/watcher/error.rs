//! Error types for the watcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while observing the download directory.
#[derive(Debug, Error)]
pub enum ObserveError {
    /// The observed directory does not exist.
    #[error("Download directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// I/O error while listing the directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the processor module.

use std::path::PathBuf;
use thiserror::Error;

use crate::browser::BrowserError;

/// Errors that abort one ticket (or, for the manifest, the whole run).
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// A ticket folder could not be created.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser failed while rendering or reading the ticket page.
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// The batch manifest is missing.
    #[error("Batch manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// The batch manifest could not be read or parsed.
    #[error("Invalid batch manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },
}

impl ProcessorError {
    pub fn invalid_manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

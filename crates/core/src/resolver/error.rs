//! Error types for the resolver module.

use thiserror::Error;

/// Errors that can occur while querying a review server.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query command could not be started.
    #[error("Failed to start {binary}: {source}")]
    SpawnFailed {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The query did not finish in time.
    #[error("Query timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The query command exited with a failure status.
    #[error("Query failed with exit code {code:?}: {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },

    /// I/O error while talking to the query command.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Creates a command failed error.
    pub fn command_failed(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            code,
            stderr: stderr.into(),
        }
    }
}

//! Trait definitions for the watcher module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ObserveError;
use super::types::ArtifactCandidate;

/// Lists the files currently present in a directory.
#[async_trait]
pub trait DirectoryObserver: Send + Sync {
    /// Returns every regular file directly inside `dir` with its modification time.
    async fn list(&self, dir: &Path) -> Result<Vec<ArtifactCandidate>, ObserveError>;
}

//! File system directory observer.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use super::error::ObserveError;
use super::traits::DirectoryObserver;
use super::types::ArtifactCandidate;

/// Observer backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsObserver;

#[async_trait]
impl DirectoryObserver for FsObserver {
    async fn list(&self, dir: &Path) -> Result<Vec<ArtifactCandidate>, ObserveError> {
        let mut entries = fs::read_dir(dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ObserveError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                }
            } else {
                ObserveError::Io(e)
            }
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // The browser may delete or rename a file between listing and stat.
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(_) => continue,
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified()?;
            files.push(ArtifactCandidate::new(entry.path(), modified));
        }

        Ok(files)
    }
}

//! File system placer implementation.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::debug;

use super::config::PlacerConfig;
use super::error::PlacerError;
use super::traits::Placer;
use super::types::Placement;

/// File system based placer implementation.
pub struct FsPlacer {
    config: PlacerConfig,
}

impl FsPlacer {
    /// Creates a new file system placer with the given configuration.
    pub fn new(config: PlacerConfig) -> Self {
        Self { config }
    }

    /// Creates a placer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PlacerConfig::default())
    }

    /// Attempts to move a file atomically (rename).
    async fn try_atomic_move(source: &Path, destination: &Path) -> Result<bool, std::io::Error> {
        match fs::rename(source, destination).await {
            Ok(()) => Ok(true),
            Err(e) => {
                // Cross-filesystem moves fail with EXDEV (18 on Linux)
                if e.kind() == std::io::ErrorKind::CrossesDevices || e.raw_os_error() == Some(18) {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Copies `source` into a newly created `destination`.
    ///
    /// Returns `Ok(None)` if `destination` appeared in the meantime.
    async fn copy_exclusive(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<Option<u64>, PlacerError> {
        let source_file = File::open(source).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlacerError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                PlacerError::Io(e)
            }
        })?;

        let dest_file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => {
                return Err(PlacerError::copy_failed(
                    source.to_path_buf(),
                    destination.to_path_buf(),
                    e,
                ))
            }
        };

        let mut reader = BufReader::with_capacity(self.config.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, dest_file);
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut total_bytes = 0u64;

        loop {
            let bytes_read = reader.read(&mut buffer).await.map_err(|e| {
                PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            if bytes_read == 0 {
                break;
            }

            writer.write_all(&buffer[..bytes_read]).await.map_err(|e| {
                PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().await.map_err(|e| {
            PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        Ok(Some(total_bytes))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> Result<(), PlacerError> {
        if !self.config.create_parents {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PlacerError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    async fn discard(path: &Path) -> Result<(), PlacerError> {
        fs::remove_file(path)
            .await
            .map_err(|e| PlacerError::remove_failed(path.to_path_buf(), e))
    }

    async fn collision(source: &Path, target: &Path) -> Result<Placement, PlacerError> {
        Self::discard(source).await?;
        debug!(
            "{} already exists, discarded {}",
            target.display(),
            source.display()
        );
        Ok(Placement::Collision {
            target: target.to_path_buf(),
        })
    }
}

#[async_trait]
impl Placer for FsPlacer {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn place_exclusive(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<Placement, PlacerError> {
        if !fs::try_exists(source).await? {
            return Err(PlacerError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        if fs::try_exists(destination).await? {
            return Self::collision(source, destination).await;
        }

        self.ensure_parent_dir(destination).await?;

        let size_bytes = fs::metadata(source).await?.len();

        if Self::try_atomic_move(source, destination)
            .await
            .map_err(|e| PlacerError::move_failed(source.to_path_buf(), destination.to_path_buf(), e))?
        {
            debug!("Moved {} to {}", source.display(), destination.display());
            return Ok(Placement::Placed {
                destination: destination.to_path_buf(),
                size_bytes,
                atomic: true,
            });
        }

        match self.copy_exclusive(source, destination).await? {
            Some(size_bytes) => {
                Self::discard(source).await?;
                debug!("Copied {} to {}", source.display(), destination.display());
                Ok(Placement::Placed {
                    destination: destination.to_path_buf(),
                    size_bytes,
                    atomic: false,
                })
            }
            None => Self::collision(source, destination).await,
        }
    }
}

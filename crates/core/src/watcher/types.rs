//! Types for the watcher module.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A file seen in the download directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCandidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl ArtifactCandidate {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    /// File name as a string, empty when the path has none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Age relative to `now`. Files stamped in the future count as brand new.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.modified).unwrap_or(Duration::ZERO)
    }
}

/// Parameters of the bounded artifact-wait loop.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    /// Extension of the expected artifact, without the dot.
    pub extension: String,
    /// Delay between two directory scans.
    pub poll_interval: Duration,
    /// Number of scans before giving up.
    pub max_attempts: u32,
    /// Only files modified this recently are accepted.
    pub recency_window: Duration,
    /// File name suffixes marking in-progress downloads.
    pub partial_markers: Vec<String>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            extension: "zip".to_string(),
            poll_interval: Duration::from_secs(1),
            max_attempts: 30,
            recency_window: Duration::from_secs(10),
            partial_markers: vec![
                ".part".to_string(),
                ".crdownload".to_string(),
                ".tmp".to_string(),
            ],
        }
    }
}

impl WaitPolicy {
    /// Sets the expected extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the number of scans.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Whether a path looks like a finished artifact of the expected type.
    pub fn is_candidate(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_lowercase(),
            None => return false,
        };
        if self
            .partial_markers
            .iter()
            .any(|marker| name.ends_with(&marker.to_lowercase()))
        {
            return false;
        }
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

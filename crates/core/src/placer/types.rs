//! Types for the placer module.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result of an exclusive placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// The file now lives at `destination`.
    Placed {
        destination: PathBuf,
        size_bytes: u64,
        /// Whether the move was a rename rather than a copy.
        atomic: bool,
    },
    /// `target` already existed; the new file was deleted.
    Collision { target: PathBuf },
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }
}

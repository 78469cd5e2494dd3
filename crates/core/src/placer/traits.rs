//! Trait definitions for the placer module.

use std::path::Path;

use async_trait::async_trait;

use super::error::PlacerError;
use super::types::Placement;

/// A placer that moves files to their final destinations without ever
/// overwriting an existing file.
#[async_trait]
pub trait Placer: Send + Sync {
    /// Returns the name of this placer implementation.
    fn name(&self) -> &str;

    /// Moves `source` to `destination`.
    ///
    /// If `destination` already exists, `source` is deleted instead and
    /// [`Placement::Collision`] is returned.
    async fn place_exclusive(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<Placement, PlacerError>;
}

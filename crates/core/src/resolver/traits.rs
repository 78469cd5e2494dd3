//! Trait definitions for the resolver module.

use async_trait::async_trait;

use crate::config::SystemEndpoint;

use super::error::QueryError;

/// Answers field queries about a merged change on a review server.
///
/// Each method returns the raw field value, or an empty string when the server
/// knows no merged change with that id.
#[async_trait]
pub trait ChangeQueryClient: Send + Sync {
    /// Returns the name of this client implementation.
    fn name(&self) -> &str;

    /// Current patch-set revision hash.
    async fn revision(&self, change_id: &str, endpoint: &SystemEndpoint)
        -> Result<String, QueryError>;

    /// Owning project path, e.g. `platform/frameworks/base`.
    async fn project(&self, change_id: &str, endpoint: &SystemEndpoint)
        -> Result<String, QueryError>;

    /// Change status, e.g. `MERGED`.
    async fn status(&self, change_id: &str, endpoint: &SystemEndpoint)
        -> Result<String, QueryError>;

    /// Last update timestamp as printed by the server.
    async fn last_updated(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError>;
}

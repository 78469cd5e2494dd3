//! Mock review-server query client for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::SystemEndpoint;
use crate::resolver::{ChangeQueryClient, QueryError};

/// Canned fields of one change.
#[derive(Debug, Clone, Default)]
pub struct CannedChange {
    pub revision: String,
    pub project: String,
    pub status: String,
    pub last_updated: String,
}

impl CannedChange {
    /// A merged change at `revision`.
    pub fn merged(revision: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            status: "MERGED".to_string(),
            ..Default::default()
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Raw `lastUpdated` value, e.g. `2023-05-10 12:00:00 CST`.
    pub fn with_last_updated(mut self, last_updated: impl Into<String>) -> Self {
        self.last_updated = last_updated.into();
        self
    }
}

/// Mock implementation of the ChangeQueryClient trait.
///
/// Unknown changes answer with empty fields, like a query that matched
/// nothing. Changes marked with [`fail_change`](Self::fail_change) time out.
#[derive(Debug, Default)]
pub struct MockQueryClient {
    /// Canned changes keyed by (host, change id).
    changes: Arc<RwLock<HashMap<(String, String), CannedChange>>>,
    /// Change ids whose queries time out.
    failing: Arc<RwLock<HashSet<String>>>,
    /// Number of queries issued.
    queries: Arc<RwLock<usize>>,
}

impl MockQueryClient {
    /// Create a new mock query client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change on `host`.
    pub async fn set_change(&self, host: &str, change_id: &str, change: CannedChange) {
        self.changes
            .write()
            .await
            .insert((host.to_string(), change_id.to_string()), change);
    }

    /// Make every query for `change_id` time out.
    pub async fn fail_change(&self, change_id: &str) {
        self.failing.write().await.insert(change_id.to_string());
    }

    /// Number of queries issued so far.
    pub async fn query_count(&self) -> usize {
        *self.queries.read().await
    }

    async fn field(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
        pick: fn(&CannedChange) -> &String,
    ) -> Result<String, QueryError> {
        *self.queries.write().await += 1;

        if self.failing.read().await.contains(change_id) {
            return Err(QueryError::Timeout { timeout_secs: 30 });
        }

        Ok(self
            .changes
            .read()
            .await
            .get(&(endpoint.host.clone(), change_id.to_string()))
            .map(|c| pick(c).clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ChangeQueryClient for MockQueryClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn revision(&self, change_id: &str, endpoint: &SystemEndpoint) -> Result<String, QueryError> {
        self.field(change_id, endpoint, |c| &c.revision).await
    }

    async fn project(&self, change_id: &str, endpoint: &SystemEndpoint) -> Result<String, QueryError> {
        self.field(change_id, endpoint, |c| &c.project).await
    }

    async fn status(&self, change_id: &str, endpoint: &SystemEndpoint) -> Result<String, QueryError> {
        self.field(change_id, endpoint, |c| &c.status).await
    }

    async fn last_updated(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError> {
        self.field(change_id, endpoint, |c| &c.last_updated).await
    }
}

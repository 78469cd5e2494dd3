//! Revision resolution on top of a query client.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::SystemEndpoint;
use crate::links::ChangeIdentifier;

use super::error::QueryError;
use super::traits::ChangeQueryClient;
use super::types::{parse_update_date, RevisionRecord};

/// Resolves change ids to their current revision.
pub struct RevisionResolver {
    client: Arc<dyn ChangeQueryClient>,
}

impl RevisionResolver {
    /// Creates a resolver over the given query client.
    pub fn new(client: Arc<dyn ChangeQueryClient>) -> Self {
        Self { client }
    }

    /// Looks up `change` on `endpoint`.
    ///
    /// Never fails: a query error or an empty answer for the revision yields an
    /// unresolved record, and errors on the secondary fields leave them empty.
    pub async fn resolve(&self, change: &ChangeIdentifier, endpoint: &SystemEndpoint) -> RevisionRecord {
        let revision = match self.client.revision(&change.id, endpoint).await {
            Ok(revision) => revision.trim().to_string(),
            Err(e) => {
                warn!(
                    "Revision query for change {} on {} failed: {}",
                    change.id, endpoint.host, e
                );
                String::new()
            }
        };

        if revision.is_empty() {
            warn!(
                "No merged revision for change {} on {}, skipping",
                change.id, endpoint.host
            );
            return RevisionRecord::unresolved(change.clone());
        }

        let status = secondary(change, "status", self.client.status(&change.id, endpoint).await);
        let project = secondary(change, "project", self.client.project(&change.id, endpoint).await);
        let last_updated = secondary(
            change,
            "lastUpdated",
            self.client.last_updated(&change.id, endpoint).await,
        );

        debug!(
            "Change {} resolved: revision={} status={} project={}",
            change.id, revision, status, project
        );

        RevisionRecord {
            change: change.clone(),
            revision,
            status,
            project,
            last_updated: parse_update_date(&last_updated),
        }
    }
}

fn secondary(change: &ChangeIdentifier, field: &str, result: Result<String, QueryError>) -> String {
    match result {
        Ok(value) => value.trim().to_string(),
        Err(e) => {
            warn!("{} query for change {} failed: {}", field, change.id, e);
            String::new()
        }
    }
}

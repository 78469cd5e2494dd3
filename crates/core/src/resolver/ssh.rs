//! Review-server queries over SSH.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use crate::config::SystemEndpoint;

use super::config::QueryConfig;
use super::error::QueryError;
use super::traits::ChangeQueryClient;

/// Returns the first token of the first `field: value` line matching `field`.
///
/// The match on the field name is case-insensitive. Returns an empty string
/// when no line carries the field.
pub fn extract_field(output: &str, field: &str) -> String {
    output
        .lines()
        .filter_map(|line| line.trim().split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(field))
        .and_then(|(_, value)| value.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

/// Query client that runs the review server's `query` command over SSH.
pub struct SshQueryClient {
    config: QueryConfig,
}

impl SshQueryClient {
    /// Creates a new SSH query client with the given configuration.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Creates a client with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(QueryConfig::default())
    }

    /// Builds ssh arguments for a merged-change query.
    fn build_args(&self, change_id: &str, endpoint: &SystemEndpoint) -> Vec<String> {
        let port = endpoint.ssh_port.unwrap_or(self.config.port);
        let mut args = vec!["-p".to_string(), port.to_string()];
        args.extend(self.config.extra_args.iter().cloned());
        args.extend([
            format!("{}@{}", endpoint.ssh_user, endpoint.host),
            "gerrit".to_string(),
            "query".to_string(),
            "status:merged".to_string(),
            "--format=TEXT".to_string(),
            "--current-patch-set".to_string(),
            format!("change:{}", change_id),
        ]);
        args
    }

    /// Runs one query and returns its standard output.
    async fn run_query(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError> {
        let args = self.build_args(change_id, endpoint);
        debug!("Querying {} for change {}", endpoint.host, change_id);

        let child = Command::new(&self.config.ssh_binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| QueryError::SpawnFailed {
                binary: self.config.ssh_binary.clone(),
                source: e,
            })?;

        // Dropping the child on timeout kills it.
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        match timeout(timeout_duration, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    return Err(QueryError::command_failed(
                        output.status.code(),
                        String::from_utf8_lossy(&output.stderr).trim(),
                    ));
                }
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(Err(e)) => Err(QueryError::Io(e)),
            Err(_) => Err(QueryError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }),
        }
    }

    async fn query_field(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
        field: &str,
    ) -> Result<String, QueryError> {
        let output = self.run_query(change_id, endpoint).await?;
        Ok(extract_field(&output, field))
    }
}

#[async_trait]
impl ChangeQueryClient for SshQueryClient {
    fn name(&self) -> &str {
        "ssh"
    }

    async fn revision(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError> {
        self.query_field(change_id, endpoint, "revision").await
    }

    async fn project(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError> {
        self.query_field(change_id, endpoint, "project").await
    }

    async fn status(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError> {
        self.query_field(change_id, endpoint, "status").await
    }

    async fn last_updated(
        &self,
        change_id: &str,
        endpoint: &SystemEndpoint,
    ) -> Result<String, QueryError> {
        // Only the date part survives the first-token rule, which is all we use.
        self.query_field(change_id, endpoint, "lastUpdated").await
    }
}

//! Configuration for the resolver module.

use serde::{Deserialize, Serialize};

/// Configuration for the SSH query client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Path to the ssh binary.
    #[serde(default = "default_ssh_binary")]
    pub ssh_binary: String,

    /// Default SSH port of the review servers.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout for a single query in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Additional ssh arguments placed before the destination.
    #[serde(default = "default_extra_args")]
    pub extra_args: Vec<String>,
}

fn default_ssh_binary() -> String {
    "ssh".to_string()
}

fn default_port() -> u16 {
    29418
}

fn default_timeout() -> u64 {
    30
}

fn default_extra_args() -> Vec<String> {
    vec!["-o".to_string(), "BatchMode=yes".to_string()]
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            ssh_binary: default_ssh_binary(),
            port: default_port(),
            timeout_secs: default_timeout(),
            extra_args: default_extra_args(),
        }
    }
}

impl QueryConfig {
    /// Sets the ssh binary.
    pub fn with_ssh_binary(mut self, binary: impl Into<String>) -> Self {
        self.ssh_binary = binary.into();
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

use super::{types::Config, ConfigError};
use crate::links::SourceSystem;

/// Validate configuration
/// Currently validates:
/// - Output root and project are set
/// - Tracker URLs are set
/// - Polling interval and attempt budget are non-zero
/// - Configured systems have a host, an SSH user and a web base
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.output.root.as_os_str().is_empty() {
        return Err(invalid("output.root cannot be empty"));
    }
    if config.output.project.trim().is_empty() {
        return Err(invalid("output.project cannot be empty"));
    }

    if config.tracker.issue_base_url.trim().is_empty() {
        return Err(invalid("tracker.issue_base_url cannot be empty"));
    }
    if config.tracker.document_base_url.trim().is_empty() {
        return Err(invalid("tracker.document_base_url cannot be empty"));
    }

    if config.download.poll_interval_ms == 0 {
        return Err(invalid("download.poll_interval_ms cannot be 0"));
    }
    if config.download.max_attempts == 0 {
        return Err(invalid("download.max_attempts cannot be 0"));
    }

    for system in SourceSystem::ALL {
        if let Some(endpoint) = config.systems.get(system) {
            if endpoint.host.trim().is_empty()
                || endpoint.ssh_user.trim().is_empty()
                || endpoint.web_base.trim().is_empty()
            {
                return Err(ConfigError::ValidationError(format!(
                    "systems.{} needs host, ssh_user and web_base",
                    system
                )));
            }
        }
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

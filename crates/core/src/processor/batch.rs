//! Batch manifest loading.
//!
//! A manifest is a TOML file listing tickets:
//!
//! ```toml
//! [[tickets]]
//! id = "T-1"
//! folder = "T-1 audio dropout"
//!
//! [[tickets]]
//! id = "['T-2', 'T-3']"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::ProcessorError;
use super::types::TicketJob;

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    tickets: Vec<ManifestRow>,
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    folder: String,
}

/// Reduces a list-literal cell such as `['A-1', 'A-2']` to its first element.
///
/// Other values are returned trimmed.
pub fn normalize_ticket_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return trimmed.to_string();
    };

    inner
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_string()
}

/// Parses manifest text into jobs.
///
/// Rows with an empty id are skipped; an empty folder defaults to the id.
pub fn parse_batch(text: &str, origin: &Path) -> Result<Vec<TicketJob>, ProcessorError> {
    let manifest: Manifest =
        toml::from_str(text).map_err(|e| ProcessorError::invalid_manifest(origin, e.to_string()))?;

    let mut jobs = Vec::with_capacity(manifest.tickets.len());
    for (index, row) in manifest.tickets.into_iter().enumerate() {
        let id = normalize_ticket_id(&row.id);
        if id.is_empty() {
            warn!("Skipping manifest row {} without a ticket id", index + 1);
            continue;
        }
        let folder = match row.folder.trim() {
            "" => id.clone(),
            folder => folder.to_string(),
        };
        jobs.push(TicketJob::new(id, folder));
    }

    debug!("Loaded {} ticket(s) from {}", jobs.len(), origin.display());
    Ok(jobs)
}

/// Reads and parses the manifest at `path`.
pub async fn load_batch(path: &Path) -> Result<Vec<TicketJob>, ProcessorError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ProcessorError::ManifestNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(ProcessorError::invalid_manifest(path, e.to_string())),
    };
    parse_batch(&text, path)
}

//! Patch download URLs.

use crate::config::{SystemEndpoint, UrlShape};
use crate::resolver::RevisionRecord;

/// Builds the zip download URL of `record`'s revision.
///
/// Returns `None` for a project-scoped server when the project is unknown.
pub fn download_url(endpoint: &SystemEndpoint, record: &RevisionRecord) -> Option<String> {
    let base = endpoint.web_base.trim_end_matches('/');
    let change = match endpoint.url_shape {
        UrlShape::Change => record.change.id.clone(),
        UrlShape::ProjectScoped => {
            if record.project.is_empty() {
                return None;
            }
            format!("{}~{}", urlencoding::encode(&record.project), record.change.id)
        }
    };

    Some(format!(
        "{}/changes/{}/revisions/{}/patch?zip",
        base, change, record.revision
    ))
}

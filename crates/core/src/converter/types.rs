//! Types for the converter module.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What happened to a ticket's primary document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// The document was not in the scratch directory.
    Missing,
    /// The PDF was placed and the original deleted.
    Converted { destination: PathBuf },
    /// The original document was placed without conversion.
    Unconverted { destination: PathBuf, reason: String },
    /// The investigation directory already had a file of that name; the new
    /// one was discarded.
    Discarded { target: PathBuf },
    /// The document could not be placed at all.
    Failed { reason: String },
}

impl DocumentOutcome {
    /// Whether a file reached the investigation directory.
    pub fn is_placed(&self) -> bool {
        matches!(
            self,
            DocumentOutcome::Converted { .. } | DocumentOutcome::Unconverted { .. }
        )
    }
}

//! Types for the resolver module.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::links::ChangeIdentifier;

/// What the review server knows about a change.
///
/// An empty `revision` means the change could not be resolved and must be
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    pub change: ChangeIdentifier,
    pub revision: String,
    pub status: String,
    pub project: String,
    pub last_updated: Option<NaiveDate>,
}

impl RevisionRecord {
    /// A record for a change the server could not resolve.
    pub fn unresolved(change: ChangeIdentifier) -> Self {
        Self {
            change,
            revision: String::new(),
            status: String::new(),
            project: String::new(),
            last_updated: None,
        }
    }

    /// Whether a revision hash was found.
    pub fn is_resolved(&self) -> bool {
        !self.revision.is_empty()
    }
}

/// Parses the date part of a server timestamp such as `2023-05-10 12:00:00 CST`.
pub fn parse_update_date(raw: &str) -> Option<NaiveDate> {
    let token = raw.split_whitespace().next()?;
    NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::SourceSystem;

    #[test]
    fn test_unresolved_record() {
        let record = RevisionRecord::unresolved(ChangeIdentifier::new("123456", SourceSystem::P));
        assert!(!record.is_resolved());
        assert!(record.project.is_empty());
        assert!(record.last_updated.is_none());
    }

    #[test]
    fn test_parse_update_date() {
        assert_eq!(
            parse_update_date("2023-05-10 12:00:00 CST"),
            NaiveDate::from_ymd_opt(2023, 5, 10)
        );
        assert_eq!(
            parse_update_date("2021-01-02"),
            NaiveDate::from_ymd_opt(2021, 1, 2)
        );
        assert_eq!(parse_update_date(""), None);
        assert_eq!(parse_update_date("yesterday"), None);
    }
}

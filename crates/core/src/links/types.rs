//! Types for the links module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the change-management deployments a link can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    /// Links of the form `.../gerrit/#/c/<id>`.
    P,
    /// Links containing `gerrit/` without the `#/c/` fragment.
    Q,
    /// Links containing `/#/c/` on a host without `gerrit` in the URL.
    Ep2,
}

impl SourceSystem {
    /// All systems, in the order their downloads are processed for a ticket.
    pub const ALL: [SourceSystem; 3] = [SourceSystem::P, SourceSystem::Q, SourceSystem::Ep2];

    /// Short lowercase name used in config keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystem::P => "p",
            SourceSystem::Q => "q",
            SourceSystem::Ep2 => "ep2",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric change id tagged with the system it was discovered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeIdentifier {
    pub id: String,
    pub system: SourceSystem,
}

impl ChangeIdentifier {
    pub fn new(id: impl Into<String>, system: SourceSystem) -> Self {
        Self {
            id: id.into(),
            system,
        }
    }
}

impl fmt::Display for ChangeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.system, self.id)
    }
}

/// Identifiers discovered on one page, grouped by source system.
///
/// Each sequence keeps discovery order and may contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLinks {
    pub p: Vec<String>,
    pub q: Vec<String>,
    pub ep2: Vec<String>,
}

impl ClassifiedLinks {
    /// Identifiers found for the given system.
    pub fn get(&self, system: SourceSystem) -> &[String] {
        match system {
            SourceSystem::P => &self.p,
            SourceSystem::Q => &self.q,
            SourceSystem::Ep2 => &self.ep2,
        }
    }

    pub(crate) fn get_mut(&mut self, system: SourceSystem) -> &mut Vec<String> {
        match system {
            SourceSystem::P => &mut self.p,
            SourceSystem::Q => &mut self.q,
            SourceSystem::Ep2 => &mut self.ep2,
        }
    }

    /// Whether no identifier was found for any system.
    pub fn is_empty(&self) -> bool {
        self.p.is_empty() && self.q.is_empty() && self.ep2.is_empty()
    }

    /// Total identifiers across all systems, duplicates included.
    pub fn total(&self) -> usize {
        self.p.len() + self.q.len() + self.ep2.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_system_serde_names() {
        let json = serde_json::to_string(&SourceSystem::Ep2).unwrap();
        assert_eq!(json, "\"ep2\"");
        let parsed: SourceSystem = serde_json::from_str("\"q\"").unwrap();
        assert_eq!(parsed, SourceSystem::Q);
    }

    #[test]
    fn test_change_identifier_display() {
        let change = ChangeIdentifier::new("123456", SourceSystem::P);
        assert_eq!(change.to_string(), "p:123456");
    }

    #[test]
    fn test_classified_links_accessors() {
        let mut links = ClassifiedLinks::default();
        assert!(links.is_empty());

        links.get_mut(SourceSystem::Q).push("789012".to_string());
        assert_eq!(links.get(SourceSystem::Q), ["789012".to_string()]);
        assert!(links.get(SourceSystem::P).is_empty());
        assert_eq!(links.total(), 1);
        assert!(!links.is_empty());
    }
}

//! Classification rules, one per source system.
//!
//! Rules are evaluated in table order and the first matching rule wins, so the
//! P rule has to stay ahead of the others: its marker also satisfies the Q
//! marker.

use super::types::SourceSystem;

/// Which digit runs of a matching URL are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// Only the first digit run is considered; it is dropped if out of bounds.
    FirstOnly,
    /// Every digit run within bounds is kept.
    All,
}

/// How URLs are recognized for a system and which ids are extracted from them.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub system: SourceSystem,
    /// URL predicate.
    pub matches: fn(&str) -> bool,
    /// Exclusive lower bound on digit-run length.
    pub min_len_exclusive: usize,
    /// Exclusive upper bound on digit-run length.
    pub max_len_exclusive: usize,
    pub mode: TokenMode,
}

impl ClassificationRule {
    /// Whether a digit run has an acceptable length for this system.
    pub fn accepts_len(&self, len: usize) -> bool {
        len > self.min_len_exclusive && len < self.max_len_exclusive
    }
}

fn is_p_link(url: &str) -> bool {
    url.contains("gerrit/#/c/")
}

fn is_ep2_link(url: &str) -> bool {
    url.contains("/#/c/") && !url.contains("gerrit")
}

fn is_q_link(url: &str) -> bool {
    url.contains("gerrit/")
}

/// Rules in precedence order.
pub const CLASSIFICATION_RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        system: SourceSystem::P,
        matches: is_p_link,
        min_len_exclusive: 4,
        max_len_exclusive: 10,
        mode: TokenMode::FirstOnly,
    },
    ClassificationRule {
        system: SourceSystem::Ep2,
        matches: is_ep2_link,
        min_len_exclusive: 4,
        max_len_exclusive: 10,
        mode: TokenMode::All,
    },
    ClassificationRule {
        system: SourceSystem::Q,
        matches: is_q_link,
        min_len_exclusive: 5,
        max_len_exclusive: 10,
        mode: TokenMode::All,
    },
];

/// The rule for a given system.
pub fn rule_for(system: SourceSystem) -> &'static ClassificationRule {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.system == system)
        .unwrap_or(&CLASSIFICATION_RULES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_bounds() {
        let p = rule_for(SourceSystem::P);
        assert!(!p.accepts_len(4));
        assert!(p.accepts_len(5));
        assert!(p.accepts_len(9));
        assert!(!p.accepts_len(10));

        let q = rule_for(SourceSystem::Q);
        assert!(!q.accepts_len(5));
        assert!(q.accepts_len(6));
        assert!(!q.accepts_len(10));

        let ep2 = rule_for(SourceSystem::Ep2);
        assert!(ep2.accepts_len(5));
        assert_eq!(ep2.mode, TokenMode::All);
    }

    #[test]
    fn test_every_system_has_a_rule() {
        for system in SourceSystem::ALL {
            assert_eq!(rule_for(system).system, system);
        }
    }

    #[test]
    fn test_p_rule_precedes_q_rule() {
        let p_pos = CLASSIFICATION_RULES
            .iter()
            .position(|r| r.system == SourceSystem::P)
            .unwrap();
        let q_pos = CLASSIFICATION_RULES
            .iter()
            .position(|r| r.system == SourceSystem::Q)
            .unwrap();
        assert!(p_pos < q_pos);
    }

    #[test]
    fn test_markers_are_disjoint_in_precedence_order() {
        let url = "https://host/gerrit/#/c/123456/";
        let first = CLASSIFICATION_RULES.iter().find(|r| (r.matches)(url)).unwrap();
        assert_eq!(first.system, SourceSystem::P);

        let url = "https://review.example.org/#/c/1234567/";
        let first = CLASSIFICATION_RULES.iter().find(|r| (r.matches)(url)).unwrap();
        assert_eq!(first.system, SourceSystem::Ep2);
    }
}

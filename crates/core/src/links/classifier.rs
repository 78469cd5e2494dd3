//! Hyperlink classification.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::rules::{ClassificationRule, TokenMode, CLASSIFICATION_RULES};
use super::types::{ClassifiedLinks, SourceSystem};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit regex"));

/// Classifies a single URL.
///
/// Returns the owning system and the ids extracted from the URL, or `None`
/// when no rule matches. A matching URL may still yield no ids.
pub fn classify_link(url: &str) -> Option<(SourceSystem, Vec<String>)> {
    let rule = CLASSIFICATION_RULES.iter().find(|rule| (rule.matches)(url))?;
    Some((rule.system, extract_ids(rule, url)))
}

fn extract_ids(rule: &ClassificationRule, url: &str) -> Vec<String> {
    let mut runs = DIGIT_RUN.find_iter(url).map(|m| m.as_str());
    match rule.mode {
        TokenMode::FirstOnly => runs
            .next()
            .filter(|run| rule.accepts_len(run.len()))
            .map(|run| vec![run.to_string()])
            .unwrap_or_default(),
        TokenMode::All => runs
            .filter(|run| rule.accepts_len(run.len()))
            .map(str::to_string)
            .collect(),
    }
}

/// Classifies every hyperlink of a page.
///
/// Discovery order is kept within each class and duplicates are preserved.
pub fn classify_links<S: AsRef<str>>(hrefs: &[S]) -> ClassifiedLinks {
    let mut classified = ClassifiedLinks::default();

    for href in hrefs {
        let url = href.as_ref();
        if let Some((system, ids)) = classify_link(url) {
            debug!("Found {} link: {} ({} ids)", system, url, ids.len());
            classified.get_mut(system).extend(ids);
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_page_scenario() {
        let hrefs = ["https://x/gerrit/#/c/123456/", "https://x/gerrit/789012/3"];
        let classified = classify_links(&hrefs);
        assert_eq!(classified.p, vec!["123456"]);
        assert_eq!(classified.q, vec!["789012"]);
        assert!(classified.ep2.is_empty());
    }

    #[test]
    fn test_p_link_goes_to_p_only() {
        for id in ["100000", "654321", "999999"] {
            let url = format!("https://review.example.com/gerrit/#/c/{}/4", id);
            let classified = classify_links(&[url]);
            assert_eq!(classified.p, vec![id.to_string()]);
            assert!(classified.q.is_empty());
            assert!(classified.ep2.is_empty());
        }
    }

    #[test]
    fn test_p_link_keeps_first_run_only() {
        let classified = classify_links(&["https://h/gerrit/#/c/123456/7654321"]);
        assert_eq!(classified.p, vec!["123456"]);
    }

    #[test]
    fn test_p_link_with_short_first_run_yields_nothing() {
        // The first run is the "10" of the address, which is too short.
        let classified = classify_links(&["http://10.1.2.3/gerrit/#/c/123456/"]);
        assert!(classified.is_empty());
    }

    #[test]
    fn test_ep2_link_goes_to_ep2_only() {
        let classified = classify_links(&["http://review.example.org/#/c/1234567/"]);
        assert_eq!(classified.ep2, vec!["1234567"]);
        assert!(classified.p.is_empty());
        assert!(classified.q.is_empty());
    }

    #[test]
    fn test_ep2_keeps_every_qualifying_run() {
        let classified = classify_links(&["http://review.example.org/#/c/12345/678901/12"]);
        assert_eq!(classified.ep2, vec!["12345", "678901"]);
    }

    #[test]
    fn test_q_bounds_reject_five_digits() {
        let classified = classify_links(&["https://x/gerrit/12345/123456789/1234567890"]);
        assert_eq!(classified.q, vec!["123456789"]);
    }

    #[test]
    fn test_unrelated_links_are_ignored() {
        let hrefs = [
            "https://tracker.example.com/browse/ABC-123",
            "https://example.com/path/1234567",
            "",
        ];
        assert!(classify_links(&hrefs).is_empty());
        assert!(classify_link("https://example.com/").is_none());
    }

    #[test]
    fn test_matching_link_without_ids_contributes_nothing() {
        let (system, ids) = classify_link("https://x/gerrit/dashboard").unwrap();
        assert_eq!(system, SourceSystem::Q);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let hrefs = ["https://x/gerrit/#/c/123456/", "https://x/gerrit/#/c/123456/2"];
        let classified = classify_links(&hrefs);
        assert_eq!(classified.p, vec!["123456", "123456"]);
    }
}

//! Identifier deduplication.

use std::collections::HashSet;

/// Removes duplicate identifiers, keeping the first occurrence of each.
///
/// Sequence numbers are assigned in the order returned here, so a rerun on the
/// same page produces the same file names.
pub fn deduplicate<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .map(AsRef::as_ref)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

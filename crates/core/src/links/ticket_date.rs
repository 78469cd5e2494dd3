//! Ticket creation date discovery, used by optional date gating.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date regex"));

/// Finds the earliest date carried by `from=` style links on a ticket page.
///
/// Returns `None` when the page carries no such link.
pub fn find_ticket_date<S: AsRef<str>>(hrefs: &[S]) -> Option<NaiveDate> {
    hrefs
        .iter()
        .map(AsRef::as_ref)
        .filter(|href| href.contains("from"))
        .filter_map(|href| {
            let value = href.rsplit('=').next()?;
            let found = ISO_DATE.find(value)?;
            NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d").ok()
        })
        .min()
}

//! Change-link discovery on rendered ticket pages.
//!
//! Hyperlinks harvested from a ticket page are sorted into three disjoint
//! classes, one per change-management deployment, and reduced to the numeric
//! change identifiers they carry.
//!
//! # Example
//!
//! ```ignore
//! use ticketdl_core::links::{classify_links, deduplicate, SourceSystem};
//!
//! let hrefs = vec![
//!     "https://x/gerrit/#/c/123456/".to_string(),
//!     "https://x/gerrit/789012/3".to_string(),
//! ];
//! let classified = classify_links(&hrefs);
//! assert_eq!(classified.get(SourceSystem::P), ["123456"]);
//!
//! let unique = deduplicate(classified.get(SourceSystem::Q));
//! ```

mod classifier;
mod dedup;
mod rules;
mod ticket_date;
mod types;

pub use classifier::{classify_link, classify_links};
pub use dedup::deduplicate;
pub use rules::{rule_for, ClassificationRule, TokenMode, CLASSIFICATION_RULES};
pub use ticket_date::find_ticket_date;
pub use types::{ChangeIdentifier, ClassifiedLinks, SourceSystem};

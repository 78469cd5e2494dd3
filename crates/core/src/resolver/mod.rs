//! Change revision resolution.
//!
//! Every discovered change id is looked up on its review server to find the
//! current patch-set revision, the owning project and the last update date.
//! The lookup itself sits behind [`ChangeQueryClient`]; [`SshQueryClient`]
//! implements it with the review server's SSH query command, and
//! [`RevisionResolver`] turns the raw answers into a [`RevisionRecord`].
//!
//! # Example
//!
//! ```ignore
//! use ticketdl_core::resolver::{QueryConfig, RevisionResolver, SshQueryClient};
//!
//! let client = Arc::new(SshQueryClient::new(QueryConfig::default()));
//! let resolver = RevisionResolver::new(client);
//!
//! let record = resolver.resolve(&change, &endpoint).await;
//! if record.is_resolved() {
//!     println!("{} -> {}", record.change.id, record.revision);
//! }
//! ```

mod config;
mod error;
mod resolver;
mod ssh;
mod traits;
mod types;

pub use config::QueryConfig;
pub use error::QueryError;
pub use resolver::RevisionResolver;
pub use ssh::{extract_field, SshQueryClient};
pub use traits::ChangeQueryClient;
pub use types::{parse_update_date, RevisionRecord};

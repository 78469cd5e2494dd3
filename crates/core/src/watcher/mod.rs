//! Artifact arrival detection.
//!
//! The browser writes downloads into a shared directory and gives no signal
//! when a file is complete. [`ArtifactWaiter`] bridges that gap with a bounded
//! polling loop over a [`DirectoryObserver`], timed by an injectable
//! [`Clock`](crate::clock::Clock).

mod error;
mod fs_observer;
mod traits;
mod types;
mod waiter;

pub use error::ObserveError;
pub use fs_observer::FsObserver;
pub use traits::DirectoryObserver;
pub use types::{ArtifactCandidate, WaitPolicy};
pub use waiter::ArtifactWaiter;

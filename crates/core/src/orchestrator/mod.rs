//! Per-system download orchestration.
//!
//! For every deduplicated change id of one source system, in order:
//! - **Resolve** the current revision; unresolvable changes are skipped
//! - **Trigger** the patch download in a background browser window
//! - **Wait** for the artifact to land in the shared download directory
//! - **Place** it as `<ticket>-<NN>.<ext>` without overwriting anything
//!
//! Sequence numbers are allocated per ticket and only consumed by changes
//! whose artifact actually arrived.

mod config;
mod runner;
mod types;
mod urls;

pub use config::DownloadConfig;
pub use runner::{DownloadOrchestrator, SystemDownload};
pub use types::{ChangeOutcome, ChangeState, DownloadTask, SequenceAllocator};
pub use urls::download_url;

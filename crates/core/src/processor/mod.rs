//! Processor module for the per-ticket pipeline.
//!
//! This module provides the `IssueProcessor` which, for one ticket:
//! - Creates the `Investigation`, `Source` and `TestResult` folders
//! - Renders the ticket page and triggers the primary document download
//! - Hands the document to the `DocumentConverter`
//! - Classifies and deduplicates the change links on the page
//! - Runs the `DownloadOrchestrator` per source system
//!
//! A failing ticket is logged and recorded; the batch moves on to the next.
//!
//! # Example
//!
//! ```ignore
//! use ticketdl_core::processor::{load_batch, IssueProcessor, ProcessorConfig};
//!
//! let jobs = load_batch(Path::new("tickets.toml")).await?;
//! let processor = IssueProcessor::new(ProcessorConfig::from_config(&config), browser, documents, downloads, clock);
//!
//! let cancelled = AtomicBool::new(false);
//! let report = processor.process_batch(&config.output.project, &jobs, &cancelled).await;
//! report.log_summary();
//! ```

mod batch;
mod config;
mod error;
mod issue;
mod types;

pub use batch::{load_batch, normalize_ticket_id, parse_batch};
pub use config::ProcessorConfig;
pub use error::ProcessorError;
pub use issue::IssueProcessor;
pub use types::{BatchEntry, BatchReport, BatchSummary, TicketJob, TicketReport, TicketStatus};

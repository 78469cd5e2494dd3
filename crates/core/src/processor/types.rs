//! Types for the processor module.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::converter::DocumentOutcome;
use crate::links::ClassifiedLinks;
use crate::orchestrator::{ChangeOutcome, ChangeState};

/// One row of the batch: a ticket and the folder its files go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketJob {
    pub ticket_id: String,
    pub folder: String,
}

impl TicketJob {
    pub fn new(ticket_id: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            folder: folder.into(),
        }
    }
}

/// Everything that happened for one processed ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReport {
    pub ticket_id: String,
    /// Creation date found on the page, or the processing date.
    pub ticket_date: NaiveDate,
    pub document: DocumentOutcome,
    /// Identifiers found per system, before deduplication.
    pub links: ClassifiedLinks,
    /// Outcomes of all changes, in processing order.
    pub changes: Vec<ChangeOutcome>,
}

impl TicketReport {
    /// Number of artifacts placed into the source directory.
    pub fn placed(&self) -> usize {
        self.count(|s| matches!(s, ChangeState::Placed { .. }))
    }

    fn count(&self, pred: impl Fn(&ChangeState) -> bool) -> usize {
        self.changes.iter().filter(|c| pred(&c.state)).count()
    }
}

/// Final status of one ticket in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TicketStatus {
    Completed { report: TicketReport },
    Failed { error: String },
}

/// A batch row together with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    #[serde(flatten)]
    pub job: TicketJob,
    #[serde(flatten)]
    pub status: TicketStatus,
}

/// Counters over a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub tickets: usize,
    pub completed: usize,
    pub failed: usize,
    pub documents_placed: usize,
    pub placed: usize,
    pub collisions: usize,
    pub skipped: usize,
    pub date_gated: usize,
    pub timed_out: usize,
    pub change_failures: usize,
}

/// Result of a batch run, written as JSON next to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub project: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Set when the run stopped before the last ticket.
    pub interrupted: bool,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            started_at: Utc::now(),
            finished_at: None,
            interrupted: false,
            entries: Vec::new(),
        }
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            tickets: self.entries.len(),
            ..Default::default()
        };

        for entry in &self.entries {
            let report = match &entry.status {
                TicketStatus::Completed { report } => report,
                TicketStatus::Failed { .. } => {
                    summary.failed += 1;
                    continue;
                }
            };
            summary.completed += 1;
            if report.document.is_placed() {
                summary.documents_placed += 1;
            }
            for change in &report.changes {
                match change.state {
                    ChangeState::Placed { .. } => summary.placed += 1,
                    ChangeState::CollisionDiscarded { .. } => summary.collisions += 1,
                    ChangeState::Skipped => summary.skipped += 1,
                    ChangeState::DateGated { .. } => summary.date_gated += 1,
                    ChangeState::TimedOut => summary.timed_out += 1,
                    ChangeState::Failed { .. } => summary.change_failures += 1,
                }
            }
        }

        summary
    }

    /// Logs one line per ticket and the totals.
    pub fn log_summary(&self) {
        for entry in &self.entries {
            match &entry.status {
                TicketStatus::Completed { report } => info!(
                    "{}: {} of {} change(s) placed",
                    entry.job.ticket_id,
                    report.placed(),
                    report.changes.len()
                ),
                TicketStatus::Failed { error } => {
                    info!("{}: failed: {}", entry.job.ticket_id, error)
                }
            }
        }

        let s = self.summary();
        info!(
            "Batch {}: {}/{} ticket(s) completed, {} placed, {} collision(s), {} skipped, {} timed out, {} failed",
            self.project,
            s.completed,
            s.tickets,
            s.placed,
            s.collisions,
            s.skipped,
            s.timed_out,
            s.change_failures + s.failed
        );
    }
}

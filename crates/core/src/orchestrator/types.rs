//! Types for download orchestration.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::links::ChangeIdentifier;

/// One change whose artifact is being fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub change: ChangeIdentifier,
    /// Directory the artifact is placed into.
    pub target_dir: PathBuf,
    /// Number the artifact will carry if it arrives.
    pub sequence: u32,
}

impl DownloadTask {
    /// `<ticket>-<NN>.<ext>`, with the number zero-padded to two digits.
    pub fn file_name(&self, ticket_id: &str, extension: &str) -> String {
        format!("{}-{:02}.{}", ticket_id, self.sequence, extension)
    }

    pub fn target_path(&self, ticket_id: &str, extension: &str) -> PathBuf {
        self.target_dir.join(self.file_name(ticket_id, extension))
    }
}

/// Hands out per-ticket sequence numbers starting at 1.
///
/// A number is only consumed by [`commit`](Self::commit), so a change that
/// never produced an artifact leaves no gap.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    next: u32,
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The number the next committed artifact gets.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Consumes the current number and returns it.
    pub fn commit(&mut self) -> u32 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// How many numbers were consumed so far.
    pub fn consumed(&self) -> u32 {
        self.next - 1
    }
}

/// Terminal state of one change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChangeState {
    /// No merged revision could be resolved.
    Skipped,
    /// Last updated after the ticket was created.
    DateGated { last_updated: NaiveDate },
    /// The artifact was placed under its sequence number.
    Placed { path: PathBuf, sequence: u32 },
    /// The target name already existed; the new artifact was deleted.
    CollisionDiscarded { target: PathBuf, sequence: u32 },
    /// No artifact showed up within the attempt budget.
    TimedOut,
    /// The download could not be triggered or placed.
    Failed { reason: String },
}

impl ChangeState {
    pub fn is_placed(&self) -> bool {
        matches!(self, ChangeState::Placed { .. })
    }

    /// The sequence number this change consumed, if any.
    pub fn sequence(&self) -> Option<u32> {
        match self {
            ChangeState::Placed { sequence, .. }
            | ChangeState::CollisionDiscarded { sequence, .. } => Some(*sequence),
            _ => None,
        }
    }
}

/// What happened to one change of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOutcome {
    pub change: ChangeIdentifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub state: ChangeState,
}

impl ChangeOutcome {
    pub fn new(change: ChangeIdentifier, state: ChangeState) -> Self {
        Self {
            change,
            revision: None,
            url: None,
            state,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

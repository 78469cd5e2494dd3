//! Download orchestrator implementation.
//!
//! Drives each change through its state machine:
//! Resolving → (Skipped | Downloading) → Waiting → (Placed | CollisionDiscarded | TimedOut)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::clock::Clock;
use crate::config::SystemEndpoint;
use crate::links::{ChangeIdentifier, SourceSystem};
use crate::placer::{Placement, Placer};
use crate::resolver::RevisionResolver;
use crate::watcher::ArtifactWaiter;

use super::config::DownloadConfig;
use super::types::{ChangeOutcome, ChangeState, DownloadTask, SequenceAllocator};
use super::urls::download_url;

/// The downloads of one source system for one ticket.
#[derive(Debug, Clone)]
pub struct SystemDownload<'a> {
    pub ticket_id: &'a str,
    pub system: SourceSystem,
    pub endpoint: &'a SystemEndpoint,
    /// The ticket's source directory.
    pub target_dir: &'a Path,
    /// Creation date of the ticket, used by the date gate.
    pub ticket_date: Option<NaiveDate>,
}

/// Fetches change artifacts through the browser and files them under the
/// ticket's source directory.
pub struct DownloadOrchestrator {
    config: DownloadConfig,
    browser: Arc<dyn BrowserSession>,
    resolver: Arc<RevisionResolver>,
    waiter: ArtifactWaiter,
    placer: Arc<dyn Placer>,
    clock: Arc<dyn Clock>,
    download_dir: PathBuf,
}

impl DownloadOrchestrator {
    /// Create a new orchestrator watching `download_dir`.
    pub fn new(
        config: DownloadConfig,
        browser: Arc<dyn BrowserSession>,
        resolver: Arc<RevisionResolver>,
        waiter: ArtifactWaiter,
        placer: Arc<dyn Placer>,
        clock: Arc<dyn Clock>,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            browser,
            resolver,
            waiter,
            placer,
            clock,
            download_dir: download_dir.into(),
        }
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Processes `change_ids` in order.
    ///
    /// Per-change failures end up in the returned outcomes; nothing here
    /// aborts the remaining changes.
    pub async fn download_all(
        &self,
        job: &SystemDownload<'_>,
        change_ids: &[String],
        sequence: &mut SequenceAllocator,
    ) -> Vec<ChangeOutcome> {
        info!(
            "Downloading {} {} change(s) for {}",
            change_ids.len(),
            job.system,
            job.ticket_id
        );

        let mut outcomes = Vec::with_capacity(change_ids.len());
        for id in change_ids {
            let change = ChangeIdentifier::new(id.clone(), job.system);
            outcomes.push(self.download_one(job, change, sequence).await);
        }
        outcomes
    }

    async fn download_one(
        &self,
        job: &SystemDownload<'_>,
        change: ChangeIdentifier,
        sequence: &mut SequenceAllocator,
    ) -> ChangeOutcome {
        let record = self.resolver.resolve(&change, job.endpoint).await;
        if !record.is_resolved() {
            return ChangeOutcome::new(change, ChangeState::Skipped);
        }
        info!("Change {} at revision {}", change, record.revision);

        if self.config.date_gate {
            if let (Some(ticket_date), Some(last_updated)) = (job.ticket_date, record.last_updated) {
                if last_updated > ticket_date {
                    info!(
                        "Change {} updated {} after ticket date {}, skipping",
                        change, last_updated, ticket_date
                    );
                    return ChangeOutcome::new(change, ChangeState::DateGated { last_updated })
                        .with_revision(record.revision);
                }
            }
        }

        let Some(url) = download_url(job.endpoint, &record) else {
            warn!("No project known for change {}, cannot build its URL", change);
            return ChangeOutcome::new(
                change,
                ChangeState::Failed {
                    reason: "project path unknown".to_string(),
                },
            )
            .with_revision(record.revision);
        };

        let outcome = ChangeOutcome::new(change.clone(), ChangeState::TimedOut)
            .with_revision(record.revision.clone())
            .with_url(url.clone());

        info!("Downloading {}", url);
        if let Err(e) = self.browser.open_in_background(&url).await {
            warn!("Failed to open download for {}: {}", change, e);
            return ChangeOutcome {
                state: ChangeState::Failed {
                    reason: e.to_string(),
                },
                ..outcome
            };
        }

        let task = DownloadTask {
            change,
            target_dir: job.target_dir.to_path_buf(),
            sequence: sequence.peek(),
        };
        self.clock.sleep(self.config.settle_delay()).await;

        let state = self.await_and_place(job.ticket_id, &task, sequence).await;
        ChangeOutcome { state, ..outcome }
    }

    async fn await_and_place(
        &self,
        ticket_id: &str,
        task: &DownloadTask,
        sequence: &mut SequenceAllocator,
    ) -> ChangeState {
        let candidate = match self.waiter.wait_for_artifact(&self.download_dir).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                warn!(
                    "No new {} file found for {} ({}) in {}",
                    self.config.artifact_extension,
                    task.file_name(ticket_id, &self.config.artifact_extension),
                    task.change,
                    self.download_dir.display()
                );
                return ChangeState::TimedOut;
            }
            Err(e) => {
                warn!("Cannot watch {}: {}", self.download_dir.display(), e);
                return ChangeState::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let target = task.target_path(ticket_id, &self.config.artifact_extension);
        debug!("Placing {} as {}", candidate.path.display(), target.display());

        let state = match self.placer.place_exclusive(&candidate.path, &target).await {
            Ok(Placement::Placed { destination, .. }) => {
                let sequence = sequence.commit();
                info!("Renamed {} to {}", candidate.file_name(), destination.display());
                ChangeState::Placed {
                    path: destination,
                    sequence,
                }
            }
            Ok(Placement::Collision { target }) => {
                let sequence = sequence.commit();
                warn!(
                    "{} already exists, deleted the new download {}",
                    target.display(),
                    candidate.file_name()
                );
                ChangeState::CollisionDiscarded { target, sequence }
            }
            Err(e) => {
                warn!("Failed to place {}: {}", candidate.path.display(), e);
                return ChangeState::Failed {
                    reason: e.to_string(),
                };
            }
        };

        self.clock.sleep(self.config.settle_delay()).await;
        state
    }
}

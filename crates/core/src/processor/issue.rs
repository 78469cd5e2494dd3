//! Per-ticket coordinator.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tracing::{error, info, warn};

use crate::browser::BrowserSession;
use crate::clock::Clock;
use crate::converter::DocumentConverter;
use crate::links::{classify_links, deduplicate, find_ticket_date, SourceSystem};
use crate::orchestrator::{DownloadOrchestrator, SequenceAllocator, SystemDownload};

use super::config::ProcessorConfig;
use super::error::ProcessorError;
use super::types::{BatchEntry, BatchReport, TicketJob, TicketReport, TicketStatus};

/// Runs the whole pipeline for one ticket at a time.
pub struct IssueProcessor {
    config: ProcessorConfig,
    browser: Arc<dyn BrowserSession>,
    documents: DocumentConverter,
    downloads: DownloadOrchestrator,
    clock: Arc<dyn Clock>,
}

impl IssueProcessor {
    pub fn new(
        config: ProcessorConfig,
        browser: Arc<dyn BrowserSession>,
        documents: DocumentConverter,
        downloads: DownloadOrchestrator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            browser,
            documents,
            downloads,
            clock,
        }
    }

    /// Processes every job in order, stopping early once `cancelled` is set.
    ///
    /// A failing ticket is logged and recorded; it never stops the batch.
    pub async fn process_batch(
        &self,
        project: &str,
        jobs: &[TicketJob],
        cancelled: &AtomicBool,
    ) -> BatchReport {
        let mut report = BatchReport::new(project);

        for (index, job) in jobs.iter().enumerate() {
            if cancelled.load(Ordering::SeqCst) {
                warn!(
                    "Stopping before {} ({} ticket(s) not processed)",
                    job.ticket_id,
                    jobs.len() - index
                );
                report.interrupted = true;
                break;
            }

            info!(
                "Processing {} ({}/{}) into '{}'",
                job.ticket_id,
                index + 1,
                jobs.len(),
                job.folder
            );

            let status = match self.process(job).await {
                Ok(ticket) => TicketStatus::Completed { report: ticket },
                Err(e) => {
                    error!("Error processing {}: {}", job.ticket_id, e);
                    TicketStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.entries.push(BatchEntry {
                job: job.clone(),
                status,
            });
        }

        report.finished_at = Some(Utc::now());
        report
    }

    /// Processes one ticket.
    pub async fn process(&self, job: &TicketJob) -> Result<TicketReport, ProcessorError> {
        let output = &self.config.output;
        let investigation_dir = output.investigation_path(&job.folder);
        let source_dir = output.source_path(&job.folder);
        let test_result_dir = output.test_result_path(&job.folder);

        for dir in [&investigation_dir, &source_dir, &test_result_dir] {
            create_dir(dir).await?;
        }

        let tracker = &self.config.tracker;
        self.browser
            .navigate(&tracker.issue_url(&job.ticket_id))
            .await?;
        self.clock.sleep(self.config.settle_delay).await;

        self.browser
            .open_in_background(&tracker.document_url(&job.ticket_id))
            .await?;
        self.clock.sleep(self.config.settle_delay).await;

        let document = self
            .documents
            .process(
                &tracker.document_file_name(&job.ticket_id),
                &self.config.download_dir,
                &investigation_dir,
            )
            .await;

        let hrefs = self.browser.hyperlinks().await?;
        let links = classify_links(&hrefs);
        let ticket_date = find_ticket_date(&hrefs).unwrap_or_else(|| {
            DateTime::<Local>::from(self.clock.now()).date_naive()
        });
        info!(
            "{}: {} P, {} Q, {} EP2 link id(s), ticket date {}",
            job.ticket_id,
            links.p.len(),
            links.q.len(),
            links.ep2.len(),
            ticket_date
        );

        let mut changes = Vec::new();
        if !self.downloads.config().enabled {
            info!("Patch downloads disabled, skipping change links");
        } else {
            let mut sequence = SequenceAllocator::new();
            for system in SourceSystem::ALL {
                let ids = links.get(system);
                if ids.is_empty() {
                    continue;
                }
                let Some(endpoint) = self.config.systems.get(system) else {
                    warn!(
                        "No server configured for {} links, ignoring {} id(s)",
                        system,
                        ids.len()
                    );
                    continue;
                };

                let unique = deduplicate(ids);
                let download = SystemDownload {
                    ticket_id: &job.ticket_id,
                    system,
                    endpoint,
                    target_dir: &source_dir,
                    ticket_date: Some(ticket_date),
                };
                changes.extend(
                    self.downloads
                        .download_all(&download, &unique, &mut sequence)
                        .await,
                );
            }
        }

        Ok(TicketReport {
            ticket_id: job.ticket_id.clone(),
            ticket_date,
            document,
            links,
            changes,
        })
    }
}

async fn create_dir(path: &Path) -> Result<(), ProcessorError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| ProcessorError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, SystemsConfig, TrackerConfig, UrlShape};
    use crate::converter::DocumentOutcome;
    use crate::orchestrator::DownloadConfig;
    use crate::placer::FsPlacer;
    use crate::resolver::RevisionResolver;
    use crate::testing::{fixtures, CannedChange, ManualClock, MockBrowser, MockPdfConverter, MockQueryClient};
    use crate::watcher::{ArtifactWaiter, FsObserver};
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const ISSUE_BASE: &str = "https://tracker.example.com/browse/";

    struct Harness {
        _temp: TempDir,
        root: PathBuf,
        downloads: PathBuf,
        clock: Arc<ManualClock>,
        browser: Arc<MockBrowser>,
        queries: Arc<MockQueryClient>,
    }

    impl Harness {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let root = temp.path().join("out");
            let downloads = temp.path().join("downloads");
            std::fs::create_dir_all(&downloads).unwrap();
            let clock = Arc::new(ManualClock::new(SystemTime::now()));
            let browser = Arc::new(MockBrowser::new(&downloads).with_clock(clock.clone()));
            Self {
                _temp: temp,
                root,
                downloads,
                clock,
                browser,
                queries: Arc::new(MockQueryClient::new()),
            }
        }

        fn processor(&self, download: DownloadConfig) -> IssueProcessor {
            let config = ProcessorConfig {
                output: OutputConfig::new(&self.root, "phase2"),
                tracker: TrackerConfig::new(ISSUE_BASE, "https://tracker.example.com/word/"),
                systems: SystemsConfig::default()
                    .with(SourceSystem::P, fixtures::endpoint("10.0.0.1", UrlShape::Change)),
                download_dir: self.downloads.clone(),
                settle_delay: Duration::from_secs(2),
            };
            let placer = Arc::new(FsPlacer::with_defaults());
            let documents = DocumentConverter::new(
                Arc::new(MockPdfConverter::unavailable()),
                placer.clone(),
                self.clock.clone(),
                Duration::from_secs(2),
            );
            let waiter = ArtifactWaiter::new(
                Arc::new(FsObserver),
                self.clock.clone(),
                download.wait_policy(),
            );
            let downloads = DownloadOrchestrator::new(
                download,
                self.browser.clone(),
                Arc::new(RevisionResolver::new(self.queries.clone())),
                waiter,
                placer,
                self.clock.clone(),
                &self.downloads,
            );
            IssueProcessor::new(config, self.browser.clone(), documents, downloads, self.clock.clone())
        }
    }

    #[tokio::test]
    async fn test_creates_folders_and_moves_document() {
        let h = Harness::new();
        h.browser.serve_download("/word/T-1/", "T-1.doc").await;

        let report = h
            .processor(DownloadConfig::default())
            .process(&TicketJob::new("T-1", "T-1 crash"))
            .await
            .unwrap();

        let ticket_dir = h.root.join("T-1 crash");
        assert!(ticket_dir.join("Investigation").is_dir());
        assert!(ticket_dir.join("Source").is_dir());
        assert!(ticket_dir.join("TestResult").is_dir());
        assert!(matches!(report.document, DocumentOutcome::Unconverted { .. }));
        assert!(ticket_dir.join("Investigation").join("T-1.doc").exists());
        assert_eq!(
            h.browser.navigations().await,
            vec![format!("{}T-1", ISSUE_BASE)]
        );
    }

    #[tokio::test]
    async fn test_downloads_disabled() {
        let h = Harness::new();
        h.browser
            .set_page(&format!("{}T-1", ISSUE_BASE), vec![fixtures::p_link("123456")])
            .await;
        h.queries
            .set_change("10.0.0.1", "123456", CannedChange::merged("abc"))
            .await;

        let download = DownloadConfig {
            enabled: false,
            ..Default::default()
        };
        let report = h
            .processor(download)
            .process(&TicketJob::new("T-1", "T-1"))
            .await
            .unwrap();

        assert_eq!(report.links.p, vec!["123456"]);
        assert!(report.changes.is_empty());
        assert_eq!(h.queries.query_count().await, 0);
    }

    #[tokio::test]
    async fn test_unconfigured_system_is_ignored() {
        let h = Harness::new();
        h.browser
            .set_page(&format!("{}T-1", ISSUE_BASE), vec![fixtures::q_link("789012")])
            .await;

        let report = h
            .processor(DownloadConfig::default())
            .process(&TicketJob::new("T-1", "T-1"))
            .await
            .unwrap();

        assert_eq!(report.links.q, vec!["789012"]);
        assert!(report.changes.is_empty());
    }

    #[tokio::test]
    async fn test_batch_continues_after_failed_ticket() {
        let h = Harness::new();
        h.browser.fail_page(&format!("{}T-1", ISSUE_BASE)).await;

        let jobs = vec![TicketJob::new("T-1", "T-1"), TicketJob::new("T-2", "T-2")];
        let cancelled = AtomicBool::new(false);
        let report = h
            .processor(DownloadConfig::default())
            .process_batch("phase2", &jobs, &cancelled)
            .await;

        assert_eq!(report.entries.len(), 2);
        assert!(matches!(report.entries[0].status, TicketStatus::Failed { .. }));
        assert!(matches!(report.entries[1].status, TicketStatus::Completed { .. }));
        assert!(!report.interrupted);
        assert!(report.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_batch_stops_when_cancelled() {
        let h = Harness::new();
        let jobs = vec![TicketJob::new("T-1", "T-1")];
        let cancelled = AtomicBool::new(true);

        let report = h
            .processor(DownloadConfig::default())
            .process_batch("phase2", &jobs, &cancelled)
            .await;

        assert!(report.entries.is_empty());
        assert!(report.interrupted);
        assert!(h.browser.navigations().await.is_empty());
    }
}

//! Primary document handling with conversion fallback.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::placer::{Placement, Placer};

use super::traits::PdfConverter;
use super::types::DocumentOutcome;

/// Moves a ticket's primary document from the scratch directory into the
/// investigation directory, converting it to PDF when possible.
pub struct DocumentConverter {
    converter: Arc<dyn PdfConverter>,
    placer: Arc<dyn Placer>,
    clock: Arc<dyn Clock>,
    settle_delay: Duration,
}

impl DocumentConverter {
    pub fn new(
        converter: Arc<dyn PdfConverter>,
        placer: Arc<dyn Placer>,
        clock: Arc<dyn Clock>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            converter,
            placer,
            clock,
            settle_delay,
        }
    }

    /// Handles `<scratch_dir>/<document_name>`.
    ///
    /// A missing document is a warning and returns immediately. Every other
    /// branch ends with the settle delay.
    pub async fn process(
        &self,
        document_name: &str,
        scratch_dir: &Path,
        investigation_dir: &Path,
    ) -> DocumentOutcome {
        let source = scratch_dir.join(document_name);
        if !tokio::fs::metadata(&source)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
        {
            warn!("{} not found in {}", document_name, scratch_dir.display());
            return DocumentOutcome::Missing;
        }

        let outcome = self
            .convert_or_move(&source, scratch_dir, investigation_dir)
            .await;
        self.clock.sleep(self.settle_delay).await;
        outcome
    }

    async fn convert_or_move(
        &self,
        source: &Path,
        scratch_dir: &Path,
        investigation_dir: &Path,
    ) -> DocumentOutcome {
        let reason = if self.converter.is_available().await {
            info!("Converting {} to PDF", source.display());
            match self.converter.convert_to_pdf(source, scratch_dir).await {
                Ok(pdf) => return self.place_pdf(source, &pdf, investigation_dir).await,
                Err(e) => {
                    warn!(
                        "PDF conversion of {} failed: {}. Moving the original instead",
                        source.display(),
                        e
                    );
                    e.to_string()
                }
            }
        } else {
            warn!(
                "{} is not available. Moving {} without conversion",
                self.converter.name(),
                source.display()
            );
            format!("{} not available", self.converter.name())
        };

        self.place_original(source, investigation_dir, reason).await
    }

    async fn place_pdf(&self, source: &Path, pdf: &Path, investigation_dir: &Path) -> DocumentOutcome {
        let Some(pdf_name) = pdf.file_name() else {
            return self
                .place_original(source, investigation_dir, "converter returned no file name".to_string())
                .await;
        };
        let destination = investigation_dir.join(pdf_name);

        match self.placer.place_exclusive(pdf, &destination).await {
            Ok(Placement::Placed { destination, .. }) => {
                info!("Moved {} to {}", pdf.display(), destination.display());
                remove_original(source).await;
                DocumentOutcome::Converted { destination }
            }
            Ok(Placement::Collision { target }) => {
                warn!("{} already exists, discarded the new PDF", target.display());
                remove_original(source).await;
                DocumentOutcome::Discarded { target }
            }
            Err(e) => {
                warn!("Failed to place {}: {}", pdf.display(), e);
                self.place_original(source, investigation_dir, e.to_string())
                    .await
            }
        }
    }

    async fn place_original(
        &self,
        source: &Path,
        investigation_dir: &Path,
        reason: String,
    ) -> DocumentOutcome {
        let Some(name) = source.file_name() else {
            return DocumentOutcome::Failed { reason };
        };
        let destination = investigation_dir.join(name);

        match self.placer.place_exclusive(source, &destination).await {
            Ok(Placement::Placed { destination, .. }) => {
                info!("Moved {} to {}", source.display(), destination.display());
                DocumentOutcome::Unconverted {
                    destination,
                    reason,
                }
            }
            Ok(Placement::Collision { target }) => {
                warn!("{} already exists, discarded the new document", target.display());
                DocumentOutcome::Discarded { target }
            }
            Err(e) => {
                warn!("Failed to place {}: {}", source.display(), e);
                DocumentOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

async fn remove_original(source: &Path) {
    if let Err(e) = tokio::fs::remove_file(source).await {
        warn!("Failed to remove {}: {}", source.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placer::FsPlacer;
    use crate::testing::{ManualClock, MockPdfConverter};
    use std::time::SystemTime;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        scratch: std::path::PathBuf,
        investigation: std::path::PathBuf,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let scratch = temp.path().join("downloads");
        let investigation = temp.path().join("T-1").join("Investigation");
        std::fs::create_dir_all(&scratch).unwrap();
        std::fs::create_dir_all(&investigation).unwrap();
        Fixture {
            _temp: temp,
            scratch,
            investigation,
            clock: Arc::new(ManualClock::new(SystemTime::now())),
        }
    }

    fn documents(fx: &Fixture, converter: MockPdfConverter) -> DocumentConverter {
        DocumentConverter::new(
            Arc::new(converter),
            Arc::new(FsPlacer::with_defaults()),
            fx.clock.clone(),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_unavailable_converter_moves_original() {
        let fx = fixture();
        std::fs::write(fx.scratch.join("T-1.doc"), b"doc").unwrap();

        let outcome = documents(&fx, MockPdfConverter::unavailable())
            .process("T-1.doc", &fx.scratch, &fx.investigation)
            .await;

        assert!(matches!(outcome, DocumentOutcome::Unconverted { .. }));
        assert!(fx.investigation.join("T-1.doc").exists());
        assert!(!fx.scratch.join("T-1.doc").exists());
        assert_eq!(fx.clock.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_successful_conversion() {
        let fx = fixture();
        std::fs::write(fx.scratch.join("T-1.doc"), b"doc").unwrap();

        let outcome = documents(&fx, MockPdfConverter::succeeding())
            .process("T-1.doc", &fx.scratch, &fx.investigation)
            .await;

        assert_eq!(
            outcome,
            DocumentOutcome::Converted {
                destination: fx.investigation.join("T-1.pdf")
            }
        );
        assert!(!fx.scratch.join("T-1.doc").exists());
        assert!(!fx.scratch.join("T-1.pdf").exists());
        assert!(!fx.investigation.join("T-1.doc").exists());
    }

    #[tokio::test]
    async fn test_failed_conversion_moves_original() {
        let fx = fixture();
        std::fs::write(fx.scratch.join("T-1.doc"), b"doc").unwrap();

        let outcome = documents(&fx, MockPdfConverter::failing())
            .process("T-1.doc", &fx.scratch, &fx.investigation)
            .await;

        match outcome {
            DocumentOutcome::Unconverted { destination, reason } => {
                assert_eq!(destination, fx.investigation.join("T-1.doc"));
                assert!(reason.contains("timed out"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!fx.scratch.join("T-1.doc").exists());
    }

    #[tokio::test]
    async fn test_missing_document_is_noop() {
        let fx = fixture();

        let outcome = documents(&fx, MockPdfConverter::succeeding())
            .process("T-1.doc", &fx.scratch, &fx.investigation)
            .await;

        assert_eq!(outcome, DocumentOutcome::Missing);
        assert_eq!(fx.clock.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_existing_investigation_file_is_kept() {
        let fx = fixture();
        std::fs::write(fx.scratch.join("T-1.doc"), b"new").unwrap();
        std::fs::write(fx.investigation.join("T-1.doc"), b"old").unwrap();

        let outcome = documents(&fx, MockPdfConverter::unavailable())
            .process("T-1.doc", &fx.scratch, &fx.investigation)
            .await;

        assert!(matches!(outcome, DocumentOutcome::Discarded { .. }));
        assert_eq!(std::fs::read(fx.investigation.join("T-1.doc")).unwrap(), b"old");
        assert!(!fx.scratch.join("T-1.doc").exists());
    }
}

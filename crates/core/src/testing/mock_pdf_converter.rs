//! Mock PDF converter for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{ConverterError, PdfConverter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unavailable,
    Failing,
    Succeeding,
}

/// Mock implementation of the PdfConverter trait.
#[derive(Debug)]
pub struct MockPdfConverter {
    mode: Mode,
    /// Inputs passed to `convert_to_pdf`.
    conversions: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockPdfConverter {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            conversions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A converter that is not installed.
    pub fn unavailable() -> Self {
        Self::with_mode(Mode::Unavailable)
    }

    /// A converter whose conversions time out.
    pub fn failing() -> Self {
        Self::with_mode(Mode::Failing)
    }

    /// A converter that writes `<stem>.pdf` next to the requested output dir.
    pub fn succeeding() -> Self {
        Self::with_mode(Mode::Succeeding)
    }

    /// Inputs converted so far.
    pub async fn conversions(&self) -> Vec<PathBuf> {
        self.conversions.read().await.clone()
    }
}

#[async_trait]
impl PdfConverter for MockPdfConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        self.mode != Mode::Unavailable
    }

    async fn convert_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ConverterError> {
        self.conversions.write().await.push(input.to_path_buf());

        match self.mode {
            Mode::Unavailable => Err(ConverterError::NotFound {
                path: PathBuf::from("mock"),
            }),
            Mode::Failing => Err(ConverterError::Timeout { timeout_secs: 60 }),
            Mode::Succeeding => {
                let stem = input.file_stem().unwrap_or_default().to_string_lossy();
                let pdf = out_dir.join(format!("{}.pdf", stem));
                tokio::fs::write(&pdf, b"%PDF-1.4").await?;
                Ok(pdf)
            }
        }
    }
}

//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::ConverterError;

/// A local utility that converts office documents to PDF.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Whether the utility can be run at all.
    async fn is_available(&self) -> bool;

    /// Converts `input` and writes `<stem>.pdf` into `out_dir`.
    ///
    /// Returns the path of the produced PDF.
    async fn convert_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ConverterError>;
}

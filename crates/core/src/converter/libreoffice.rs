//! LibreOffice-based PDF conversion.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::PdfConverter;

/// Resolves `binary` against `PATH`.
///
/// A value with more than one path component is checked as given.
pub fn find_in_path(binary: &Path) -> Option<PathBuf> {
    if binary.components().count() > 1 {
        return binary.is_file().then(|| binary.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

/// Converter that shells out to `libreoffice --headless --convert-to pdf`.
pub struct LibreOfficeConverter {
    config: ConverterConfig,
}

impl LibreOfficeConverter {
    /// Creates a new converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    fn build_args(input: &Path, out_dir: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "--headless".into(),
            "--convert-to".into(),
            "pdf".into(),
            input.as_os_str().to_os_string(),
            "--outdir".into(),
            out_dir.as_os_str().to_os_string(),
        ]
    }
}

#[async_trait]
impl PdfConverter for LibreOfficeConverter {
    fn name(&self) -> &str {
        "libreoffice"
    }

    async fn is_available(&self) -> bool {
        find_in_path(&self.config.binary).is_some()
    }

    async fn convert_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ConverterError> {
        if !tokio::fs::try_exists(input).await? {
            return Err(ConverterError::InputNotFound {
                path: input.to_path_buf(),
            });
        }

        let binary = find_in_path(&self.config.binary).ok_or_else(|| ConverterError::NotFound {
            path: self.config.binary.clone(),
        })?;

        let stem = input
            .file_stem()
            .ok_or_else(|| ConverterError::conversion_failed("Input has no file name", None))?;
        let pdf_path = out_dir.join(format!("{}.pdf", stem.to_string_lossy()));

        debug!("Running {} on {}", binary.display(), input.display());

        let child = Command::new(&binary)
            .args(Self::build_args(input, out_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::NotFound {
                        path: binary.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        // Dropping the child on timeout kills it.
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        match timeout(timeout_duration, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    return Err(ConverterError::conversion_failed(
                        format!("{} exited with code: {:?}", self.name(), output.status.code()),
                        (!stderr.is_empty()).then_some(stderr),
                    ));
                }
            }
            Ok(Err(e)) => return Err(ConverterError::Io(e)),
            Err(_) => {
                return Err(ConverterError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                })
            }
        }

        if !tokio::fs::try_exists(&pdf_path).await? {
            return Err(ConverterError::conversion_failed("Output file not created", None));
        }

        Ok(pdf_path)
    }
}

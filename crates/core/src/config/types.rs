use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::browser::BrowserConfig;
use crate::converter::ConverterConfig;
use crate::links::SourceSystem;
use crate::orchestrator::DownloadConfig;
use crate::resolver::QueryConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub output: OutputConfig,
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub systems: SystemsConfig,
}

impl Config {
    /// Directory the browser saves files into. Defaults to the output root.
    pub fn download_dir(&self) -> PathBuf {
        self.browser
            .download_dir
            .clone()
            .unwrap_or_else(|| self.output.root.clone())
    }
}

/// Output tree configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Root of the produced directory tree.
    pub root: PathBuf,
    /// Project name, used for log and report file names.
    pub project: String,
    #[serde(default = "default_investigation_dir")]
    pub investigation_dir: String,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_test_result_dir")]
    pub test_result_dir: String,
}

fn default_investigation_dir() -> String {
    "Investigation".to_string()
}

fn default_source_dir() -> String {
    "Source".to_string()
}

fn default_test_result_dir() -> String {
    "TestResult".to_string()
}

impl OutputConfig {
    pub fn new(root: impl Into<PathBuf>, project: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            project: project.into(),
            investigation_dir: default_investigation_dir(),
            source_dir: default_source_dir(),
            test_result_dir: default_test_result_dir(),
        }
    }

    /// `<root>/<folder>`
    pub fn ticket_dir(&self, folder: &str) -> PathBuf {
        self.root.join(folder)
    }

    pub fn investigation_path(&self, folder: &str) -> PathBuf {
        self.ticket_dir(folder).join(&self.investigation_dir)
    }

    pub fn source_path(&self, folder: &str) -> PathBuf {
        self.ticket_dir(folder).join(&self.source_dir)
    }

    pub fn test_result_path(&self, folder: &str) -> PathBuf {
        self.ticket_dir(folder).join(&self.test_result_dir)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Durable log file, `<root>/logs/<project>.log`.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join(format!("{}.log", self.project))
    }

    /// Batch report, `<root>/logs/<project>-report.json`.
    pub fn report_file(&self) -> PathBuf {
        self.log_dir().join(format!("{}-report.json", self.project))
    }
}

/// Issue tracker configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Prefix of a ticket page URL; the ticket id is appended.
    pub issue_base_url: String,
    /// Prefix of the primary document export URL.
    pub document_base_url: String,
    #[serde(default = "default_document_extension")]
    pub document_extension: String,
}

fn default_document_extension() -> String {
    "doc".to_string()
}

impl TrackerConfig {
    pub fn new(issue_base_url: impl Into<String>, document_base_url: impl Into<String>) -> Self {
        Self {
            issue_base_url: issue_base_url.into(),
            document_base_url: document_base_url.into(),
            document_extension: default_document_extension(),
        }
    }

    pub fn issue_url(&self, ticket_id: &str) -> String {
        format!("{}{}", self.issue_base_url, ticket_id)
    }

    /// `<document_base_url><id>/<id>.<ext>`
    pub fn document_url(&self, ticket_id: &str) -> String {
        format!(
            "{}{}/{}",
            self.document_base_url,
            ticket_id,
            self.document_file_name(ticket_id)
        )
    }

    pub fn document_file_name(&self, ticket_id: &str) -> String {
        format!("{}.{}", ticket_id, self.document_extension)
    }
}

/// Download URL layout of a review server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlShape {
    /// `<web_base>/changes/<id>/revisions/<rev>/patch?zip`
    #[default]
    Change,
    /// `<web_base>/changes/<project>~<id>/revisions/<rev>/patch?zip`
    ProjectScoped,
}

/// One review server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemEndpoint {
    /// Address used for SSH queries.
    pub host: String,
    pub ssh_user: String,
    /// Overrides `query.port` for this server.
    #[serde(default)]
    pub ssh_port: Option<u16>,
    /// Base of the web UI, without a trailing slash.
    pub web_base: String,
    #[serde(default)]
    pub url_shape: UrlShape,
}

/// Review servers per source system. A system without an entry is not
/// downloaded from.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SystemsConfig {
    #[serde(default)]
    pub p: Option<SystemEndpoint>,
    #[serde(default)]
    pub q: Option<SystemEndpoint>,
    #[serde(default)]
    pub ep2: Option<SystemEndpoint>,
}

impl SystemsConfig {
    pub fn get(&self, system: SourceSystem) -> Option<&SystemEndpoint> {
        match system {
            SourceSystem::P => self.p.as_ref(),
            SourceSystem::Q => self.q.as_ref(),
            SourceSystem::Ep2 => self.ep2.as_ref(),
        }
    }

    pub fn with(mut self, system: SourceSystem, endpoint: SystemEndpoint) -> Self {
        match system {
            SourceSystem::P => self.p = Some(endpoint),
            SourceSystem::Q => self.q = Some(endpoint),
            SourceSystem::Ep2 => self.ep2 = Some(endpoint),
        }
        self
    }
}

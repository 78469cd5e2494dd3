pub mod browser;
pub mod clock;
pub mod config;
pub mod converter;
pub mod links;
pub mod orchestrator;
pub mod placer;
pub mod processor;
pub mod resolver;
pub mod testing;
pub mod watcher;

pub use browser::{BrowserConfig, BrowserError, BrowserSession, WebDriverSession};
pub use clock::{Clock, SystemClock};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SystemEndpoint,
    UrlShape,
};
pub use converter::{DocumentConverter, DocumentOutcome, LibreOfficeConverter, PdfConverter};
pub use links::{classify_links, deduplicate, ChangeIdentifier, ClassifiedLinks, SourceSystem};
pub use orchestrator::{ChangeOutcome, ChangeState, DownloadConfig, DownloadOrchestrator};
pub use placer::{FsPlacer, Placement, Placer};
pub use processor::{
    load_batch, BatchReport, IssueProcessor, ProcessorConfig, ProcessorError, TicketJob,
    TicketReport,
};
pub use resolver::{ChangeQueryClient, RevisionRecord, RevisionResolver, SshQueryClient};
pub use watcher::{ArtifactWaiter, DirectoryObserver, FsObserver};

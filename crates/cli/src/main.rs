mod logging;
mod report;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use ticketdl_core::{
    load_batch, load_config, validate_config, ArtifactWaiter, BrowserSession, Clock,
    DocumentConverter, DownloadOrchestrator, FsObserver, FsPlacer, IssueProcessor,
    LibreOfficeConverter, Placer, ProcessorConfig, RevisionResolver, SshQueryClient, SystemClock,
    WebDriverSession,
};

const DEFAULT_CONFIG: &str = "ticketdl.toml";
const DEFAULT_BATCH: &str = "tickets.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

/// Config and manifest paths: positional arguments first, then
/// `TICKETDL_CONFIG` / `TICKETDL_BATCH`, then the defaults.
fn resolve_paths(
    args: &[String],
    env_config: Option<String>,
    env_batch: Option<String>,
) -> (PathBuf, PathBuf) {
    let config = args
        .first()
        .cloned()
        .or(env_config)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let batch = args
        .get(1)
        .cloned()
        .or(env_batch)
        .unwrap_or_else(|| DEFAULT_BATCH.to_string());
    (PathBuf::from(config), PathBuf::from(batch))
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, batch_path) = resolve_paths(
        &args,
        std::env::var("TICKETDL_CONFIG").ok(),
        std::env::var("TICKETDL_BATCH").ok(),
    );

    // Load configuration
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            logging::init(None);
            return Err(e).with_context(|| format!("Failed to load config from {:?}", config_path));
        }
    };

    // Initialize logging
    logging::init(Some(&config.output.log_file()));

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded from {:?}", config_path);
    info!("Output root: {:?}", config.output.root);

    let jobs = load_batch(&batch_path)
        .await
        .with_context(|| format!("Failed to load batch from {:?}", batch_path))?;
    if jobs.is_empty() {
        warn!("No tickets in {:?}, nothing to do", batch_path);
        return Ok(());
    }
    info!("{} ticket(s) to process", jobs.len());

    let download_dir = config.download_dir();
    tokio::fs::create_dir_all(&download_dir)
        .await
        .with_context(|| format!("Failed to create download directory {:?}", download_dir))?;

    // Start the browser session
    let browser = Arc::new(
        WebDriverSession::connect(&config.browser, &download_dir)
            .await
            .context("Failed to start browser session")?,
    );
    info!("Browser session started via {}", config.browser.webdriver_url);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let placer: Arc<dyn Placer> = Arc::new(FsPlacer::with_defaults());

    let documents = DocumentConverter::new(
        Arc::new(LibreOfficeConverter::new(config.converter.clone())),
        Arc::clone(&placer),
        Arc::clone(&clock),
        Duration::from_millis(config.converter.settle_delay_ms),
    );

    let resolver = Arc::new(RevisionResolver::new(Arc::new(SshQueryClient::new(
        config.query.clone(),
    ))));
    let waiter = ArtifactWaiter::new(
        Arc::new(FsObserver),
        Arc::clone(&clock),
        config.download.wait_policy(),
    );
    let downloads = DownloadOrchestrator::new(
        config.download.clone(),
        browser.clone(),
        resolver,
        waiter,
        placer,
        Arc::clone(&clock),
        download_dir.clone(),
    );

    let processor = IssueProcessor::new(
        ProcessorConfig::from_config(&config),
        browser.clone(),
        documents,
        downloads,
        clock,
    );

    // Run the batch; a shutdown signal lets the current ticket finish
    let cancelled = AtomicBool::new(false);
    let batch = processor.process_batch(&config.output.project, &jobs, &cancelled);
    tokio::pin!(batch);

    let report = tokio::select! {
        report = &mut batch => report,
        _ = shutdown_signal() => {
            warn!("Shutdown requested, stopping after the current ticket");
            cancelled.store(true, Ordering::SeqCst);
            batch.await
        }
    };

    if let Err(e) = browser.close().await {
        warn!("Failed to close browser session: {}", e);
    }

    report.log_summary();
    let report_path = config.output.report_file();
    report::write_report(&report_path, &report).await?;
    info!("Report written to {:?}", report_path);

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths_defaults() {
        let (config, batch) = resolve_paths(&[], None, None);
        assert_eq!(config, PathBuf::from("ticketdl.toml"));
        assert_eq!(batch, PathBuf::from("tickets.toml"));
    }

    #[test]
    fn test_resolve_paths_precedence() {
        let (config, batch) = resolve_paths(
            &["/etc/ticketdl.toml".to_string()],
            Some("/env/config.toml".to_string()),
            Some("/env/batch.toml".to_string()),
        );
        assert_eq!(config, PathBuf::from("/etc/ticketdl.toml"));
        assert_eq!(batch, PathBuf::from("/env/batch.toml"));
    }
}

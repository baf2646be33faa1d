use crate::config::AppConfig;
use crate::database::{Database, PostedOperations};
use crate::errors::AppResult;
use crate::ingest::EsploraClient;
use crate::notify::publishers_from_config;
use crate::pricing::RateProvider;
use crate::processor::SwapScanner;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Poll the mempool and publish alerts for atomic swap HTLC spends
#[derive(Args)]
pub struct RunCommand {
    /// Publish for real instead of printing alerts (overrides DRY_RUN)
    #[arg(long)]
    pub live: bool,

    /// Seconds between polls (overrides config.toml)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Maximum txids examined per poll (overrides config.toml)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Path to the posted-alert database (overrides config.toml)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Esplora API base URL (overrides config.toml)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Run a single poll and exit
    #[arg(long)]
    pub once: bool,
}

impl RunCommand {
    pub async fn run(&self) -> AppResult<()> {
        let mut config = AppConfig::load()?;

        if self.live {
            config.notify.dry_run = false;
        }
        if let Some(interval) = self.interval {
            config.scanner.poll_interval_seconds = interval;
        }
        if let Some(limit) = self.limit {
            config.scanner.batch_limit = limit;
        }
        if let Some(path) = &self.database {
            config.database.path = path.clone();
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }

        let publishers = publishers_from_config(&config.notify, config.api.timeout_seconds)?;

        info!("Initialising BTC↔XMR atomic swap watcher");
        info!(
            "Mode: {}",
            if config.notify.dry_run { "DRY RUN" } else { "LIVE" }
        );

        let source = EsploraClient::new(config.api.clone())?;
        let rates = RateProvider::new(&config.pricing)?;
        let database = Database::open(&config.database.path)?;

        let mut scanner = SwapScanner::new(Box::new(source), Box::new(rates), publishers, database)
            .with_explorer_url(config.notify.explorer_url.clone())
            .with_title(config.notify.title.clone())
            .with_concurrency(config.api.concurrent_requests);

        if self.once {
            let summary = scanner.scan_once(config.scanner.batch_limit).await?;
            println!("{:#?}", summary);
            match scanner.database().get_posted_stats() {
                Ok(stats) => println!("{}", stats),
                Err(e) => warn!("Could not read posted statistics: {}", e),
            }
            return Ok(());
        }

        scanner
            .run(
                Duration::from_secs(config.scanner.poll_interval_seconds),
                config.scanner.batch_limit,
            )
            .await
    }
}

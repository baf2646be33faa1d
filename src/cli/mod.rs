use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// BTC↔XMR Atomic Swap Watcher
#[derive(Parser)]
#[command(name = "atomic-swap-watch")]
#[command(about = "Detect BTC↔XMR atomic swap HTLC spends in Bitcoin transactions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Poll recent transactions and publish swap alerts
    Run(commands::run::RunCommand),
    /// Classify a single transaction by txid or raw hex
    Classify(commands::classify::ClassifyCommand),
    /// Show posted-alert statistics
    Stats(commands::stats::StatsCommand),
    /// Show the current BTC→XMR rate
    Rate(commands::rate::RateCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "info" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(command) => command.run().await,
        Commands::Classify(command) => command.run().await,
        Commands::Stats(command) => command.run(),
        Commands::Rate(command) => command.run().await,
    }
}

use crate::config::AppConfig;
use crate::database::{Database, PostedOperations};
use crate::errors::AppResult;
use clap::Args;
use std::path::PathBuf;

/// Show what has been posted so far
#[derive(Args)]
pub struct StatsCommand {
    /// Path to the posted-alert database (overrides config.toml)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub fn run(&self) -> AppResult<()> {
        let path = match &self.database {
            Some(path) => path.clone(),
            None => AppConfig::get_defaults()?.database.path,
        };

        let db = Database::open(&path)?;
        let stats = db.get_posted_stats()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("{}", stats);
            if let Some(last) = &stats.last_posted_at {
                println!("Last posted at {}", last);
            }
        }
        Ok(())
    }
}

use crate::config::AppConfig;
use crate::detection::analyse_transaction_hex;
use crate::errors::{AppError, AppResult};
use crate::ingest::EsploraClient;
use crate::types::SwapVerdict;
use crate::utils::currency::format_sats_as_btc;
use clap::Args;
use tracing::info;

/// Classify a single transaction without publishing anything
#[derive(Args)]
pub struct ClassifyCommand {
    /// Transaction ID to fetch from the Esplora API
    #[arg(required_unless_present = "hex", conflicts_with = "hex")]
    pub txid: Option<String>,

    /// Raw transaction hex to classify instead of fetching
    #[arg(long)]
    pub hex: Option<String>,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,

    /// Esplora API base URL (overrides config.toml)
    #[arg(long)]
    pub api_url: Option<String>,
}

impl ClassifyCommand {
    pub async fn run(&self) -> AppResult<()> {
        let tx_hex = match (&self.hex, &self.txid) {
            (Some(hex), _) => hex.clone(),
            (None, Some(txid)) => self.fetch_hex(txid).await?,
            (None, None) => {
                return Err(AppError::Config(
                    "Provide a txid or --hex <RAW_TX>".to_string(),
                ))
            }
        };

        let verdict = analyse_transaction_hex(&tx_hex)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        } else {
            println!("{}", render_verdict(&verdict));
        }
        Ok(())
    }

    async fn fetch_hex(&self, txid: &str) -> AppResult<String> {
        let mut config = AppConfig::get_defaults()?.api;
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }

        info!("Fetching {} from {}", txid, config.base_url);
        let client = EsploraClient::new(config)?;
        Ok(client.get_transaction_hex(txid).await?)
    }
}

/// Human-readable verdict summary
pub fn render_verdict(verdict: &SwapVerdict) -> String {
    let mut lines = vec![
        format!("txid:   {}", verdict.txid),
        format!("step:   {}", verdict.step()),
        format!("amount: {}", format_sats_as_btc(verdict.amount.sats)),
    ];

    if let Some(candidate) = &verdict.classification.matched {
        lines.push(format!("input:  {}", candidate.input_index));
        lines.push(format!("script: {}", candidate.script_hex()));
    }

    lines.join("\n")
}

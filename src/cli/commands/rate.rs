use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::notify::XMR_DISPLAY_PLACES;
use crate::pricing::{RateProvider, RateSource};
use crate::utils::currency::format_decimal;
use bigdecimal::BigDecimal;
use clap::Args;

/// Show the current BTC→XMR conversion rate
#[derive(Args)]
pub struct RateCommand {
    /// Also convert this many BTC
    #[arg(long)]
    pub btc: Option<String>,
}

impl RateCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = AppConfig::get_defaults()?;
        let provider = RateProvider::new(&config.pricing)?;
        let rate = provider.btc_to_xmr().await;

        println!("1 BTC = {} XMR", format_decimal(&rate, XMR_DISPLAY_PLACES));

        if let Some(btc) = &self.btc {
            let amount: BigDecimal = btc.parse().map_err(|e| {
                AppError::InvalidData(format!("invalid BTC amount {:?}: {}", btc, e))
            })?;
            println!(
                "{} BTC = {} XMR",
                btc,
                format_decimal(&(amount * &rate), XMR_DISPLAY_PLACES)
            );
        }
        Ok(())
    }
}

//! BTC→XMR exchange rate lookups
//!
//! [`RateProvider`] caches the upstream quote for a freshness window and
//! falls back to a fixed rate when the source is unreachable, so a rate is
//! always available to the message formatter.

pub mod rates;

pub use rates::{parse_coingecko_quote, FixedRate, RateProvider};

use async_trait::async_trait;
use bigdecimal::BigDecimal;

/// Source of the XMR-per-BTC conversion rate
#[async_trait]
pub trait RateSource: Send + Sync {
    /// How many XMR one BTC buys; never fails
    async fn btc_to_xmr(&self) -> BigDecimal;
}

use crate::config::PricingConfig;
use crate::errors::{ApiError, ApiResult};
use crate::pricing::RateSource;
use async_trait::async_trait;
use bigdecimal::{BigDecimal, One, Zero};
use reqwest::Client;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// CoinGecko-backed rate provider with a freshness cache and fixed fallback
pub struct RateProvider {
    http: Client,
    url: String,
    cache_duration: Duration,
    fallback: BigDecimal,
    cache: Mutex<Option<(BigDecimal, Instant)>>,
}

impl RateProvider {
    pub fn new(config: &PricingConfig) -> ApiResult<Self> {
        let fallback = BigDecimal::from_str(&config.fallback_rate).map_err(|e| {
            ApiError::ClientSetup(format!(
                "Invalid fallback rate {:?}: {}",
                config.fallback_rate, e
            ))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::ClientSetup(e.to_string()))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            cache_duration: Duration::from_secs(config.cache_seconds),
            fallback,
            cache: Mutex::new(None),
        })
    }

    pub fn fallback_rate(&self) -> &BigDecimal {
        &self.fallback
    }

    /// Cached rate if it is still within the freshness window
    pub fn cached_rate_at(&self, now: Instant) -> Option<BigDecimal> {
        let cache = self.cache.lock().ok()?;
        match cache.as_ref() {
            Some((rate, fetched_at))
                if now.saturating_duration_since(*fetched_at) < self.cache_duration =>
            {
                Some(rate.clone())
            }
            _ => None,
        }
    }

    /// Seed the cache, e.g. from a previous run or a test
    pub fn store_rate_at(&self, rate: BigDecimal, fetched_at: Instant) {
        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some((rate, fetched_at));
        }
    }

    /// Fetch a fresh quote from upstream, bypassing the cache
    pub async fn fetch_rate(&self) -> ApiResult<BigDecimal> {
        debug!("Fetching BTC->XMR rate from {}", self.url);
        let body: Value = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::RequestFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        parse_coingecko_quote(&body)
    }
}

#[async_trait]
impl RateSource for RateProvider {
    async fn btc_to_xmr(&self) -> BigDecimal {
        if let Some(rate) = self.cached_rate_at(Instant::now()) {
            return rate;
        }

        match self.fetch_rate().await {
            Ok(rate) => {
                info!("Rate: 1 BTC = {} XMR", rate.round(4));
                self.store_rate_at(rate.clone(), Instant::now());
                rate
            }
            Err(e) => {
                warn!("Rate fetch failed, using fallback {}: {}", self.fallback, e);
                self.fallback.clone()
            }
        }
    }
}

/// Turn a CoinGecko `{"monero": {"btc": <price>}}` body into XMR per BTC
pub fn parse_coingecko_quote(body: &Value) -> ApiResult<BigDecimal> {
    let price = body
        .get("monero")
        .and_then(|m| m.get("btc"))
        .ok_or_else(|| ApiError::InvalidResponse("missing monero.btc price".to_string()))?;

    // Go through the textual form so the decimal matches what was sent
    let xmr_in_btc = match price {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()),
        Value::String(s) => BigDecimal::from_str(s),
        other => {
            return Err(ApiError::InvalidResponse(format!(
                "unexpected price value: {}",
                other
            )))
        }
    }
    .map_err(|e| ApiError::InvalidResponse(format!("unparseable price: {}", e)))?;

    if xmr_in_btc <= BigDecimal::zero() {
        return Err(ApiError::InvalidResponse(format!(
            "non-positive price: {}",
            xmr_in_btc
        )));
    }

    Ok(BigDecimal::one() / xmr_in_btc)
}

/// Constant rate source
#[derive(Debug, Clone)]
pub struct FixedRate(pub BigDecimal);

#[async_trait]
impl RateSource for FixedRate {
    async fn btc_to_xmr(&self) -> BigDecimal {
        self.0.clone()
    }
}

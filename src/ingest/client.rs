use crate::config::EsploraConfig;
use crate::errors::{ApiError, ApiResult};
use crate::ingest::{calculate_next_backoff, execute_with_timeout, SeenTxids, TransactionSource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Entry of the Esplora `/mempool/recent` listing
#[derive(Debug, Clone, Deserialize)]
pub struct RecentTransaction {
    pub txid: String,
}

/// Esplora REST client with retry logic and a recently-seen txid window
pub struct EsploraClient {
    http: Client,
    config: EsploraConfig,
    seen: Mutex<SeenTxids>,
    error_count: Arc<AtomicU64>,
}

impl EsploraClient {
    pub fn new(config: EsploraConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("atomic-swap-watch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::ClientSetup(e.to_string()))?;

        let seen = SeenTxids::new(
            config.seen_capacity,
            Duration::from_secs(config.seen_ttl_seconds),
        );

        Ok(Self {
            http,
            config,
            seen: Mutex::new(seen),
            error_count: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Get the current error count from API operations
    pub fn get_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Recent mempool transactions, unfiltered
    pub async fn get_recent_transactions(&self) -> ApiResult<Vec<RecentTransaction>> {
        let url = format!("{}/mempool/recent", self.base_url());
        let body = self.get_with_retry(&url).await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse mempool listing: {}", e))
        })
    }

    /// Raw transaction hex for `txid`
    pub async fn get_transaction_hex(&self, txid: &str) -> ApiResult<String> {
        let url = format!("{}/tx/{}/hex", self.base_url(), txid);
        let body = self.get_with_retry(&url).await?;
        Ok(body.trim().to_string())
    }

    async fn get_once(&self, url: &str) -> ApiResult<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::RequestFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        response.text().await.map_err(|e| ApiError::RequestFailed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_with_retry(&self, url: &str) -> ApiResult<String> {
        let mut attempts = 0;
        let mut backoff = Duration::from_millis(self.config.initial_backoff_ms);
        let max_retries = self.config.max_retries.max(1);

        loop {
            let outcome =
                execute_with_timeout(self.config.timeout_seconds, self.get_once(url)).await;

            let failure = match outcome {
                Ok(Ok(body)) => {
                    if attempts > 0 {
                        debug!("Fetched {} after {} attempts", url, attempts + 1);
                    }
                    return Ok(body);
                }
                Ok(Err(ApiError::NotFound { url: missing })) => {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    debug!("{} not found (non-retryable)", missing);
                    return Err(ApiError::NotFound { url: missing });
                }
                Ok(Err(e)) => e,
                Err(_) => ApiError::Timeout {
                    timeout_seconds: self.config.timeout_seconds,
                    operation: format!("GET {}", url),
                },
            };

            attempts += 1;
            self.error_count.fetch_add(1, Ordering::Relaxed);

            if attempts >= max_retries {
                error!("Failed to fetch {} after {} attempts: {}", url, attempts, failure);
                return Err(ApiError::MaxRetriesExceeded {
                    operation: format!("GET {}", url),
                });
            }

            warn!(
                "Attempt {} failed for {}, retrying in {:?}: {}",
                attempts, url, backoff, failure
            );
            sleep(backoff).await;
            backoff = calculate_next_backoff(
                backoff,
                self.config.backoff_multiplier,
                self.config.max_backoff_seconds,
            );
        }
    }
}

#[async_trait]
impl TransactionSource for EsploraClient {
    async fn list_recent_txids(&self, limit: usize) -> Vec<String> {
        let recent = match self.get_recent_transactions().await {
            Ok(recent) => recent,
            Err(e) => {
                warn!("Error fetching recent txids: {}", e);
                return Vec::new();
            }
        };

        let txids: Vec<String> = recent.into_iter().take(limit).map(|tx| tx.txid).collect();
        match self.seen.lock() {
            Ok(mut seen) => {
                let fresh = seen.filter_new(txids);
                let stats = seen.get_stats();
                debug!(
                    "Seen window: {} ids, {:.1}% repeats ({} hits, {} misses)",
                    stats.size,
                    stats.hit_rate(),
                    stats.hits,
                    stats.misses
                );
                fresh
            }
            Err(_) => {
                warn!("Seen-txid window poisoned; returning unfiltered listing");
                txids
            }
        }
    }

    async fn fetch_transaction_hex(&self, txid: &str) -> Option<String> {
        match self.get_transaction_hex(txid).await {
            Ok(hex) if !hex.is_empty() => Some(hex),
            Ok(_) => None,
            Err(e) => {
                warn!("Error fetching tx {}: {}", txid, e);
                None
            }
        }
    }
}

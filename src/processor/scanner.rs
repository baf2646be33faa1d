//! Polling scanner
//!
//! Lists recent transactions, classifies each one and publishes an alert for
//! every HTLC spend not reported before. One bad transaction never stops a
//! scan: fetch failures and malformed transactions are logged and skipped.

use crate::database::{Database, PostedOperations};
use crate::decoder::DecoderError;
use crate::detection::analyse_transaction_hex;
use crate::errors::AppResult;
use crate::ingest::TransactionSource;
use crate::notify::{format_swap_message, Publisher};
use crate::pricing::RateSource;
use crate::types::{SwapStep, SwapVerdict};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What happened to one transaction id during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Source had no data for the id right now
    Unavailable,
    /// Bytes did not decode; skipped
    Malformed(String),
    /// No HTLC-shaped input
    NotHtlc,
    /// Pair already recorded as posted
    AlreadyPosted(SwapStep),
    /// Alert published and recorded
    Posted(SwapStep),
    /// Every publisher failed; not recorded so a later scan may retry
    NotDelivered(SwapStep),
}

/// Tally of outcomes for one `scan_once` pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub listed: usize,
    pub unavailable: usize,
    pub malformed: usize,
    pub not_htlc: usize,
    pub already_posted: usize,
    pub posted: usize,
    pub not_delivered: usize,
}

impl ScanSummary {
    pub fn record(&mut self, outcome: &ScanOutcome) {
        match outcome {
            ScanOutcome::Unavailable => self.unavailable += 1,
            ScanOutcome::Malformed(_) => self.malformed += 1,
            ScanOutcome::NotHtlc => self.not_htlc += 1,
            ScanOutcome::AlreadyPosted(_) => self.already_posted += 1,
            ScanOutcome::Posted(_) => self.posted += 1,
            ScanOutcome::NotDelivered(_) => self.not_delivered += 1,
        }
    }
}

/// Ties ingestion, classification, pricing, storage and notification together
pub struct SwapScanner {
    source: Box<dyn TransactionSource>,
    rates: Box<dyn RateSource>,
    publishers: Vec<Box<dyn Publisher>>,
    database: Database,
    explorer_url: String,
    title: String,
    concurrent_requests: usize,
}

impl SwapScanner {
    pub fn new(
        source: Box<dyn TransactionSource>,
        rates: Box<dyn RateSource>,
        publishers: Vec<Box<dyn Publisher>>,
        database: Database,
    ) -> Self {
        Self {
            source,
            rates,
            publishers,
            database,
            explorer_url: "https://mempool.space/tx/".to_string(),
            title: "Atomic Swap Detected".to_string(),
            concurrent_requests: 4,
        }
    }

    pub fn with_explorer_url(mut self, explorer_url: impl Into<String>) -> Self {
        self.explorer_url = explorer_url.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Fetch and process one transaction id
    pub async fn process_transaction(&mut self, txid: &str) -> AppResult<ScanOutcome> {
        let tx_hex = self.source.fetch_transaction_hex(txid).await;
        self.process_fetched(txid, tx_hex).await
    }

    async fn process_fetched(
        &mut self,
        txid: &str,
        tx_hex: Option<String>,
    ) -> AppResult<ScanOutcome> {
        let Some(tx_hex) = tx_hex else {
            debug!("No data for {}", txid);
            return Ok(ScanOutcome::Unavailable);
        };

        let verdict = match analyse_transaction_hex(&tx_hex) {
            Ok(verdict) => verdict,
            Err(DecoderError::MalformedTransaction(reason)) => {
                warn!("Skipping malformed transaction {}: {}", txid, reason);
                return Ok(ScanOutcome::Malformed(reason));
            }
        };

        let step = verdict.step();
        match step {
            SwapStep::Unknown => return Ok(ScanOutcome::NotHtlc),
            SwapStep::Lock | SwapStep::Redeem | SwapStep::Refund => {}
        }

        if self.database.already_posted(txid, step)? {
            debug!("{} ({}) already posted", txid, step);
            return Ok(ScanOutcome::AlreadyPosted(step));
        }

        info!("HTLC DETECTED! {} ({})", txid, step);
        if self.publish(txid, &verdict).await {
            // Delivered already: a recording failure must not turn into a retry
            if let Err(e) = self
                .database
                .mark_posted(txid, step, Some(verdict.amount.sats))
            {
                error!("Alert for {} ({}) sent but not recorded: {}", txid, step, e);
            }
            Ok(ScanOutcome::Posted(step))
        } else {
            warn!("No publisher delivered the alert for {} ({})", txid, step);
            Ok(ScanOutcome::NotDelivered(step))
        }
    }

    async fn publish(&self, txid: &str, verdict: &SwapVerdict) -> bool {
        let rate = self.rates.btc_to_xmr().await;
        let xmr_amount = verdict.amount.convert(&rate);
        let message = format_swap_message(
            txid,
            verdict.amount,
            &xmr_amount,
            verdict.step(),
            &self.explorer_url,
        );

        let mut delivered = false;
        for publisher in &self.publishers {
            if publisher.send(&self.title, &message).await {
                debug!("Alert for {} delivered via {}", txid, publisher.name());
                delivered = true;
            }
        }
        delivered
    }

    /// One polling pass over recently broadcast transactions
    pub async fn scan_once(&mut self, limit: usize) -> AppResult<ScanSummary> {
        let txids = self.source.list_recent_txids(limit).await;
        let mut summary = ScanSummary {
            listed: txids.len(),
            ..ScanSummary::default()
        };
        if txids.is_empty() {
            return Ok(summary);
        }

        info!("Scanning {} new transactions...", txids.len());

        let source = &self.source;
        let fetched: Vec<(String, Option<String>)> = stream::iter(txids)
            .map(|txid| async move {
                let tx_hex = source.fetch_transaction_hex(&txid).await;
                (txid, tx_hex)
            })
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        for (txid, tx_hex) in fetched {
            match self.process_fetched(&txid, tx_hex).await {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => warn!("Error processing {}: {}", txid, e),
            }
        }

        Ok(summary)
    }

    /// Poll until Ctrl-C
    pub async fn run(&mut self, poll_interval: Duration, limit: usize) -> AppResult<()> {
        info!(
            "Starting scanner (polling every {}s, up to {} txids per poll)",
            poll_interval.as_secs(),
            limit
        );

        loop {
            match self.scan_once(limit).await {
                Ok(summary) => debug!("Scan summary: {:?}", summary),
                Err(e) => warn!("Scan failed: {}", e),
            }

            match self.database.get_posted_stats() {
                Ok(stats) => info!("{}", stats),
                Err(e) => warn!("Could not read posted statistics: {}", e),
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Scanner stopped by user");
                    return Ok(());
                }
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
    }
}

//! Scanner Pipeline Integration Tests
//!
//! Drives `SwapScanner` end to end with an in-memory transaction source, a
//! fixed rate and a recording publisher, checking dedup, skip and retry
//! behaviour across scans.

use async_trait::async_trait;
use atomic_swap_watch::database::{Database, PostedOperations};
use atomic_swap_watch::ingest::TransactionSource;
use atomic_swap_watch::notify::Publisher;
use atomic_swap_watch::pricing::FixedRate;
use atomic_swap_watch::processor::{ScanOutcome, ScanSummary, SwapScanner};
use atomic_swap_watch::types::SwapStep;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::common::fixtures::*;

/// Serves a fixed listing and a txid → hex map
struct StaticSource {
    listing: Vec<String>,
    transactions: HashMap<String, String>,
}

impl StaticSource {
    fn new(entries: Vec<(&str, Option<String>)>) -> Self {
        let listing = entries.iter().map(|(txid, _)| txid.to_string()).collect();
        let transactions = entries
            .into_iter()
            .filter_map(|(txid, hex)| hex.map(|hex| (txid.to_string(), hex)))
            .collect();
        Self {
            listing,
            transactions,
        }
    }
}

#[async_trait]
impl TransactionSource for StaticSource {
    async fn list_recent_txids(&self, limit: usize) -> Vec<String> {
        self.listing.iter().take(limit).cloned().collect()
    }

    async fn fetch_transaction_hex(&self, txid: &str) -> Option<String> {
        self.transactions.get(txid).cloned()
    }
}

/// Records delivered messages; delivery can be switched off
#[derive(Clone)]
struct RecordingPublisher {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    online: Arc<AtomicBool>,
}

impl RecordingPublisher {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        if !self.online.load(Ordering::SeqCst) {
            return false;
        }
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        true
    }
}

fn scanner_with(source: StaticSource, publisher: &RecordingPublisher) -> SwapScanner {
    SwapScanner::new(
        Box::new(source),
        Box::new(FixedRate(BigDecimal::from_str("157.0").unwrap())),
        vec![Box::new(publisher.clone())],
        Database::new(":memory:").unwrap(),
    )
    .with_title("Swap")
    .with_explorer_url("https://explorer.test/tx/")
    .with_concurrency(2)
}

fn mixed_source() -> StaticSource {
    StaticSource::new(vec![
        ("redeem", Some(transaction_hex(&[redeem_witness()], &[100_000_000]))),
        ("refund", Some(transaction_hex(&[refund_witness()], &[50_000]))),
        ("ordinary", Some(transaction_hex(&[p2wpkh_witness()], &[1_000]))),
        ("garbage", Some("deadbeef".to_string())),
        ("missing", None),
    ])
}

#[tokio::test]
async fn test_scan_posts_each_swap_once() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(mixed_source(), &publisher);

    let first = scanner.scan_once(50).await.unwrap();
    assert_eq!(
        first,
        ScanSummary {
            listed: 5,
            unavailable: 1,
            malformed: 1,
            not_htlc: 1,
            already_posted: 0,
            posted: 2,
            not_delivered: 0,
        }
    );

    let db = scanner.database();
    assert!(db.already_posted("redeem", SwapStep::Redeem).unwrap());
    assert!(db.already_posted("refund", SwapStep::Refund).unwrap());
    assert!(!db.already_posted("ordinary", SwapStep::Unknown).unwrap());

    let second = scanner.scan_once(50).await.unwrap();
    assert_eq!(second.posted, 0);
    assert_eq!(second.already_posted, 2);

    let messages = publisher.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|(title, _)| title == "Swap"));
}

#[tokio::test]
async fn test_message_carries_amount_rate_and_link() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(mixed_source(), &publisher);

    let outcome = scanner.process_transaction("redeem").await.unwrap();
    assert_eq!(outcome, ScanOutcome::Posted(SwapStep::Redeem));

    let (_, message) = publisher.messages().remove(0);
    assert!(message.contains("amount: 1.00000000 BTC ≈ 157.0000 XMR"));
    assert!(message.contains("step: REDEEM"));
    assert!(message.ends_with("https://explorer.test/tx/redeem"));
}

#[tokio::test]
async fn test_individual_outcomes() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(mixed_source(), &publisher);

    assert_eq!(
        scanner.process_transaction("missing").await.unwrap(),
        ScanOutcome::Unavailable
    );
    assert!(matches!(
        scanner.process_transaction("garbage").await.unwrap(),
        ScanOutcome::Malformed(_)
    ));
    assert_eq!(
        scanner.process_transaction("ordinary").await.unwrap(),
        ScanOutcome::NotHtlc
    );
    assert_eq!(
        scanner.process_transaction("refund").await.unwrap(),
        ScanOutcome::Posted(SwapStep::Refund)
    );
    assert_eq!(
        scanner.process_transaction("refund").await.unwrap(),
        ScanOutcome::AlreadyPosted(SwapStep::Refund)
    );
}

#[tokio::test]
async fn test_undelivered_alert_is_retried() {
    let publisher = RecordingPublisher::new();
    publisher.set_online(false);
    let mut scanner = scanner_with(mixed_source(), &publisher);

    assert_eq!(
        scanner.process_transaction("redeem").await.unwrap(),
        ScanOutcome::NotDelivered(SwapStep::Redeem)
    );
    assert!(!scanner
        .database()
        .already_posted("redeem", SwapStep::Redeem)
        .unwrap());

    publisher.set_online(true);
    assert_eq!(
        scanner.process_transaction("redeem").await.unwrap(),
        ScanOutcome::Posted(SwapStep::Redeem)
    );
    assert_eq!(publisher.messages().len(), 1);
}

#[tokio::test]
async fn test_limit_caps_listing() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(mixed_source(), &publisher);

    let summary = scanner.scan_once(2).await.unwrap();
    assert_eq!(summary.listed, 2);
    assert_eq!(summary.posted, 2);
}

#[tokio::test]
async fn test_empty_listing() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(StaticSource::new(vec![]), &publisher);

    assert_eq!(scanner.scan_once(10).await.unwrap(), ScanSummary::default());
    assert!(publisher.messages().is_empty());
}

#[tokio::test]
async fn test_stats_after_scan() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(mixed_source(), &publisher);
    scanner.scan_once(50).await.unwrap();

    let stats = scanner.database().get_posted_stats().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.total_amount_sats, 100_050_000);
    assert_eq!(stats.count_for(SwapStep::Redeem), 1);
    assert_eq!(stats.count_for(SwapStep::Refund), 1);
}

#[tokio::test]
async fn test_oversized_total_is_published_once() {
    let publisher = RecordingPublisher::new();
    let source = StaticSource::new(vec![(
        "huge",
        Some(transaction_hex(&[redeem_witness()], &[u64::MAX])),
    )]);
    let mut scanner = scanner_with(source, &publisher);

    assert_eq!(
        scanner.process_transaction("huge").await.unwrap(),
        ScanOutcome::Posted(SwapStep::Redeem)
    );
    assert_eq!(
        scanner.process_transaction("huge").await.unwrap(),
        ScanOutcome::AlreadyPosted(SwapStep::Redeem)
    );
    assert_eq!(publisher.messages().len(), 1);
    assert!(publisher.messages()[0]
        .1
        .contains("amount: 184467440737.09551615 BTC"));
}

#[tokio::test]
async fn test_recording_failure_after_delivery_still_counts_as_posted() {
    let publisher = RecordingPublisher::new();
    let mut scanner = scanner_with(mixed_source(), &publisher);
    scanner
        .database()
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_posted BEFORE INSERT ON posted
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();

    assert_eq!(
        scanner.process_transaction("redeem").await.unwrap(),
        ScanOutcome::Posted(SwapStep::Redeem)
    );
    assert_eq!(publisher.messages().len(), 1);
    assert!(!scanner
        .database()
        .already_posted("redeem", SwapStep::Redeem)
        .unwrap());
}

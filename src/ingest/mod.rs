//! Transaction ingestion
//!
//! - **Client** - Esplora REST client (Blockstream-compatible) with retry logic
//! - **Seen** - capped, time-windowed set of already listed txids
//! - **Retry** - exponential backoff and timeout helpers
//!
//! Everything the scanner needs from the network goes through
//! [`TransactionSource`]; network failures are absorbed there and surface as
//! empty listings or missing transactions.

pub mod client;
pub mod retry;
pub mod seen;

pub use client::{EsploraClient, RecentTransaction};
pub use retry::{calculate_next_backoff, execute_with_timeout};
pub use seen::{SeenStats, SeenTxids};

use async_trait::async_trait;

/// Source of raw transactions for the scanner
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Recently broadcast txids not returned before; empty on failure
    async fn list_recent_txids(&self, limit: usize) -> Vec<String>;

    /// Raw transaction hex; `None` when unavailable right now
    async fn fetch_transaction_hex(&self, txid: &str) -> Option<String>;
}

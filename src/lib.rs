//! BTC↔XMR Atomic Swap Watcher
//!
//! Recognises HTLC-shaped witness scripts in Bitcoin transactions and
//! classifies each spend as a swap redeem or refund.

pub mod cli;
pub mod config;
pub mod database;
pub mod decoder;
pub mod detection;
pub mod errors;
pub mod ingest;
pub mod notify;
pub mod pricing;
pub mod processor;
pub mod types;
pub mod utils;

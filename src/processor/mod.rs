//! Scan orchestration
//!
//! The scanner is the only stateful component: it owns the dedup database
//! and drives the pure detection pipeline over fetched transactions.

pub mod scanner;

pub use scanner::{ScanOutcome, ScanSummary, SwapScanner};

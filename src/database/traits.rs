//! Database trait abstractions

use crate::database::PostedStats;
use crate::errors::AppResult;
use crate::types::SwapStep;

/// Deduplication of published swap alerts, keyed by (txid, step)
pub trait PostedOperations {
    /// Whether an alert for this pair was already published
    fn already_posted(&self, txid: &str, step: SwapStep) -> AppResult<bool>;

    /// Record a published alert; recording the same pair twice is a no-op.
    /// Returns whether a new row was written.
    fn mark_posted(&mut self, txid: &str, step: SwapStep, amount_sats: Option<u64>)
        -> AppResult<bool>;

    /// Totals across all recorded alerts
    fn get_posted_stats(&self) -> AppResult<PostedStats>;

    /// Steps recorded for one txid, in step order
    fn get_posted_steps(&self, txid: &str) -> AppResult<Vec<SwapStep>>;
}

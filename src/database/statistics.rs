//! Posted-alert statistics

use crate::types::SwapStep;
use crate::utils::currency::format_sats_as_btc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Totals across recorded alerts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostedStats {
    pub total: u64,
    pub by_step: BTreeMap<SwapStep, u64>,
    pub total_amount_sats: u64,
    pub last_posted_at: Option<String>,
}

impl PostedStats {
    pub fn count_for(&self, step: SwapStep) -> u64 {
        self.by_step.get(&step).copied().unwrap_or(0)
    }
}

impl fmt::Display for PostedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let breakdown = self
            .by_step
            .iter()
            .map(|(step, count)| format!("{}: {}", step, count))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Posted: {} swaps ({}) totalling {}",
            self.total,
            if breakdown.is_empty() { "none" } else { &breakdown },
            format_sats_as_btc(self.total_amount_sats)
        )
    }
}

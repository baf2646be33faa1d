//! Swap step assignment
//!
//! The first HTLC-shaped candidate (lowest input index) decides the step. A
//! stack argument of preimage size (20 or 32 bytes) next to it means the
//! claim path was taken (`REDEEM`); otherwise the spend is a timeout
//! reclaim (`REFUND`). Sizes are the only evidence used: the item is never
//! hashed and compared to the script's commitment.

use super::script::is_htlc_shaped;
use super::witness::extract_candidate_scripts;
use crate::types::{ClassificationResult, DecodedTransaction, SwapStep, TransactionInput};
use tracing::debug;

/// Byte lengths treated as a revealed preimage (HASH160 and SHA256 sizes)
pub const PREIMAGE_SIZES: [usize; 2] = [20, 32];

/// Whether any stack argument (excluding the witness script) is preimage-sized
pub fn has_preimage_sized_item(input: &TransactionInput) -> bool {
    input
        .stack_arguments()
        .iter()
        .any(|item| PREIMAGE_SIZES.contains(&item.len()))
}

/// Assign exactly one swap step to a decoded transaction
pub fn classify_step(tx: &DecodedTransaction) -> ClassificationResult {
    for candidate in extract_candidate_scripts(tx) {
        if !is_htlc_shaped(&candidate.script) {
            continue;
        }

        let step = match tx.inputs.get(candidate.input_index) {
            Some(input) if has_preimage_sized_item(input) => SwapStep::Redeem,
            _ => SwapStep::Refund,
        };

        debug!(
            "Transaction {} input {} is HTLC-shaped: {}",
            tx.txid, candidate.input_index, step
        );
        return ClassificationResult {
            step,
            matched: Some(candidate),
        };
    }

    ClassificationResult::unknown()
}

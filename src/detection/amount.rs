//! Total output value of a transaction
//!
//! Summing every output is a coarse proxy for swap size; the HTLC funding
//! output is not isolated.

use crate::decoder::{DecoderError, DecoderResult};
use crate::types::{DecodedTransaction, SwapAmount};

/// Sum output values in satoshis; overflow is a decode failure, never wraparound
pub fn total_output_sats(tx: &DecodedTransaction) -> DecoderResult<u64> {
    tx.outputs.iter().try_fold(0u64, |total, output| {
        total.checked_add(output.value).ok_or_else(|| {
            DecoderError::malformed(format!("output values overflow in {}", tx.txid))
        })
    })
}

/// Total output value as a [`SwapAmount`]
pub fn extract_amount(tx: &DecodedTransaction) -> DecoderResult<SwapAmount> {
    total_output_sats(tx).map(SwapAmount::from_sat)
}

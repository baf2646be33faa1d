//! HTLC swap detection pipeline
//!
//! Decoder → witness extraction → script shape check → step assignment →
//! amount. Every function here is pure: no I/O, no shared state, so a batch
//! of transactions may be classified in any order or in parallel.

pub mod amount;
pub mod script;
pub mod step;
pub mod witness;

pub use amount::{extract_amount, total_output_sats};
pub use script::{classify_script, is_htlc_shaped, summarise_opcodes, ScriptShape};
pub use step::{classify_step, has_preimage_sized_item, PREIMAGE_SIZES};
pub use witness::{extract_candidate_scripts, MIN_CANDIDATE_SCRIPT_EXCLUSIVE};

use crate::decoder::{decode_transaction, decode_transaction_hex, DecoderResult};
use crate::types::{DecodedTransaction, SwapVerdict};

/// Classify an already decoded transaction
pub fn analyse_transaction(tx: &DecodedTransaction) -> DecoderResult<SwapVerdict> {
    let classification = classify_step(tx);
    let amount = extract_amount(tx)?;

    Ok(SwapVerdict {
        txid: tx.txid.clone(),
        classification,
        amount,
    })
}

/// Decode and classify a raw transaction buffer
pub fn analyse_raw_transaction(raw: &[u8]) -> DecoderResult<SwapVerdict> {
    let tx = decode_transaction(raw)?;
    analyse_transaction(&tx)
}

/// Decode and classify a hex-encoded transaction
pub fn analyse_transaction_hex(tx_hex: &str) -> DecoderResult<SwapVerdict> {
    let tx = decode_transaction_hex(tx_hex)?;
    analyse_transaction(&tx)
}

//! Raw transaction decoding
//!
//! Turns a serialised Bitcoin transaction (legacy or segregated-witness
//! encoding) into the [`DecodedTransaction`] view the detection pipeline
//! works on. Witness stacks keep their exact order: the last item is the
//! witness script, the rest are stack arguments.
//!
//! Wire parsing is delegated to the `bitcoin` crate's consensus decoder, which
//! rejects truncated buffers, bad compact-size prefixes and trailing bytes.

pub mod error;

pub use error::{DecoderError, DecoderResult};

use crate::types::{DecodedTransaction, TransactionInput, TransactionOutput};
use bitcoin::consensus::encode;
use bitcoin::Transaction;
use tracing::debug;

/// Decode a raw transaction buffer
pub fn decode_transaction(raw: &[u8]) -> DecoderResult<DecodedTransaction> {
    if raw.is_empty() {
        return Err(DecoderError::malformed("empty buffer"));
    }

    let transaction: Transaction = encode::deserialize(raw)?;
    let decoded = DecodedTransaction::from(&transaction);

    debug!(
        "Decoded transaction {} ({} inputs, {} outputs)",
        decoded.txid,
        decoded.inputs.len(),
        decoded.outputs.len()
    );
    Ok(decoded)
}

/// Decode a hex-encoded raw transaction, as served by Esplora `/tx/{txid}/hex`
pub fn decode_transaction_hex(tx_hex: &str) -> DecoderResult<DecodedTransaction> {
    let raw = hex::decode(tx_hex.trim())?;
    decode_transaction(&raw)
}

impl From<&Transaction> for DecodedTransaction {
    fn from(transaction: &Transaction) -> Self {
        let inputs = transaction
            .input
            .iter()
            .enumerate()
            .map(|(index, txin)| TransactionInput {
                index,
                witness: txin.witness.iter().map(|item| item.to_vec()).collect(),
            })
            .collect();

        let outputs = transaction
            .output
            .iter()
            .map(|txout| TransactionOutput {
                value: txout.value.to_sat(),
            })
            .collect();

        DecodedTransaction {
            txid: transaction.compute_txid().to_string(),
            inputs,
            outputs,
        }
    }
}

use serde::Serialize;

/// Structured form of a raw transaction, as produced by the decoder
///
/// Owned by the classification pipeline for the duration of one transaction;
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedTransaction {
    pub txid: String,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
}

/// A transaction input reduced to what swap detection needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionInput {
    /// Position in the transaction
    pub index: usize,
    /// Witness stack in serialised order (last item is the witness script for P2WSH)
    #[serde(serialize_with = "serialize_witness")]
    pub witness: Vec<Vec<u8>>,
}

impl TransactionInput {
    pub fn has_witness(&self) -> bool {
        !self.witness.is_empty()
    }

    /// Last witness item, conventionally the witness script
    pub fn witness_script(&self) -> Option<&[u8]> {
        self.witness.last().map(Vec::as_slice)
    }

    /// Witness items excluding the trailing script
    pub fn stack_arguments(&self) -> &[Vec<u8>] {
        match self.witness.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// A transaction output value in satoshis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransactionOutput {
    pub value: u64,
}

fn serialize_witness<S>(witness: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(witness.iter().map(hex::encode))
}

//! Candidate witness script extraction
//!
//! For P2WSH spends the last witness item is the witness script. Each input
//! contributes at most one candidate, in ascending input order.

use crate::types::{CandidateScript, DecodedTransaction, TransactionInput};

/// Scripts of this many bytes or fewer are too small to hold hash, equality and timelock checks
pub const MIN_CANDIDATE_SCRIPT_EXCLUSIVE: usize = 40;

/// Candidate script for a single input, if it has one
pub fn candidate_for_input(input: &TransactionInput) -> Option<CandidateScript> {
    let script = input.witness_script()?;
    if script.len() <= MIN_CANDIDATE_SCRIPT_EXCLUSIVE {
        return None;
    }

    Some(CandidateScript {
        input_index: input.index,
        script: script.to_vec(),
    })
}

/// Enumerate candidate scripts in input index order
pub fn extract_candidate_scripts(tx: &DecodedTransaction) -> Vec<CandidateScript> {
    tx.inputs.iter().filter_map(candidate_for_input).collect()
}

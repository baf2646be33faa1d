//! HTLC shape recognition for a single witness script
//!
//! The check is a shape heuristic over the set of opcodes a script contains:
//! a hashing opcode, `OP_EQUALVERIFY` and a timelock opcode must all be
//! present. Ordering, branch structure and push data are not inspected.

use bitcoin::opcodes::all::{OP_CLTV, OP_CSV, OP_EQUALVERIFY, OP_HASH160, OP_SHA256};
use bitcoin::opcodes::Opcode;
use bitcoin::script::{Instruction, Script};
use serde::Serialize;
use tracing::debug;

/// Outcome of best-effort script shape classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScriptShape {
    Shaped,
    NotShaped,
}

impl ScriptShape {
    pub fn is_shaped(&self) -> bool {
        matches!(self, ScriptShape::Shaped)
    }
}

/// Which HTLC opcode classes were seen while tokenising a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtlcOpcodeSummary {
    pub has_hash: bool,
    pub has_equal_verify: bool,
    pub has_timelock: bool,
}

impl HtlcOpcodeSummary {
    fn record(&mut self, opcode: Opcode) {
        if opcode == OP_SHA256 || opcode == OP_HASH160 {
            self.has_hash = true;
        } else if opcode == OP_EQUALVERIFY {
            self.has_equal_verify = true;
        } else if opcode == OP_CLTV || opcode == OP_CSV {
            self.has_timelock = true;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.has_hash && self.has_equal_verify && self.has_timelock
    }
}

/// Tokenise `script` and record the HTLC opcode classes it contains
///
/// Push data is skipped without interpretation. Returns `None` when the byte
/// stream cannot be tokenised (e.g. a push running past the end).
pub fn summarise_opcodes(script: &[u8]) -> Option<HtlcOpcodeSummary> {
    let mut summary = HtlcOpcodeSummary::default();

    for instruction in Script::from_bytes(script).instructions() {
        match instruction {
            Ok(Instruction::Op(opcode)) => summary.record(opcode),
            Ok(Instruction::PushBytes(_)) => {}
            Err(e) => {
                debug!("Script tokenisation failed: {}", e);
                return None;
            }
        }
    }

    Some(summary)
}

/// Classify raw script bytes; malformed scripts are `NotShaped`
pub fn classify_script(script: &[u8]) -> ScriptShape {
    match summarise_opcodes(script) {
        Some(summary) if summary.is_complete() => ScriptShape::Shaped,
        _ => ScriptShape::NotShaped,
    }
}

/// Convenience form of [`classify_script`]
pub fn is_htlc_shaped(script: &[u8]) -> bool {
    classify_script(script).is_shaped()
}

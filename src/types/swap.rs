use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Satoshis per Bitcoin, as a decimal scale (10^8)
pub const BTC_DECIMAL_SCALE: i64 = 8;

/// Lifecycle step of an atomic swap as seen from one Bitcoin transaction
///
/// `Lock` is part of the vocabulary (and of stored records) but the
/// input-witness heuristics never produce it: a funding transaction carries
/// no witness for the HTLC it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwapStep {
    Lock,
    Redeem,
    Refund,
    Unknown,
}

impl SwapStep {
    pub const ALL: [SwapStep; 4] = [
        SwapStep::Lock,
        SwapStep::Redeem,
        SwapStep::Refund,
        SwapStep::Unknown,
    ];

    /// Stable name used in storage keys and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStep::Lock => "LOCK",
            SwapStep::Redeem => "REDEEM",
            SwapStep::Refund => "REFUND",
            SwapStep::Unknown => "UNKNOWN",
        }
    }

    /// Whether the step describes an HTLC spend worth reporting
    pub fn is_swap(&self) -> bool {
        match self {
            SwapStep::Lock | SwapStep::Redeem | SwapStep::Refund => true,
            SwapStep::Unknown => false,
        }
    }
}

impl fmt::Display for SwapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOCK" => Ok(SwapStep::Lock),
            "REDEEM" => Ok(SwapStep::Redeem),
            "REFUND" => Ok(SwapStep::Refund),
            "UNKNOWN" => Ok(SwapStep::Unknown),
            other => Err(format!("unknown swap step: {}", other)),
        }
    }
}

/// A witness script candidate taken from one input
///
/// Invariant: `script.len()` exceeds the extractor's size floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateScript {
    pub input_index: usize,
    #[serde(serialize_with = "serialize_hex")]
    pub script: Vec<u8>,
}

impl CandidateScript {
    pub fn script_hex(&self) -> String {
        hex::encode(&self.script)
    }
}

/// Terminal output of the step classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub step: SwapStep,
    /// The HTLC-shaped script that decided the step; absent for `Unknown`
    pub matched: Option<CandidateScript>,
}

impl ClassificationResult {
    pub fn unknown() -> Self {
        Self {
            step: SwapStep::Unknown,
            matched: None,
        }
    }

    pub fn script(&self) -> Option<&[u8]> {
        self.matched.as_ref().map(|c| c.script.as_slice())
    }
}

/// Exact total output value of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SwapAmount {
    pub sats: u64,
}

impl SwapAmount {
    pub fn from_sat(sats: u64) -> Self {
        Self { sats }
    }

    /// Whole-BTC amount: sats / 100,000,000 with no rounding
    pub fn to_btc(&self) -> BigDecimal {
        BigDecimal::new(BigInt::from(self.sats), BTC_DECIMAL_SCALE)
    }

    /// Convert to another unit at `rate` units per BTC
    pub fn convert(&self, rate: &BigDecimal) -> BigDecimal {
        self.to_btc() * rate
    }
}

/// Full pipeline verdict for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapVerdict {
    pub txid: String,
    pub classification: ClassificationResult,
    pub amount: SwapAmount,
}

impl SwapVerdict {
    pub fn step(&self) -> SwapStep {
        self.classification.step
    }
}

fn serialize_hex<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(bytes))
}

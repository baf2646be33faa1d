//! Decoder-specific error types

/// Result type for decoder operations
pub type DecoderResult<T> = Result<T, DecoderError>;

/// Decoder-specific error types
///
/// A transaction either decodes completely or fails with
/// `MalformedTransaction`; no partially decoded structure is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecoderError {
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),
}

impl DecoderError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DecoderError::MalformedTransaction(reason.into())
    }
}

impl From<bitcoin::consensus::encode::Error> for DecoderError {
    fn from(err: bitcoin::consensus::encode::Error) -> Self {
        DecoderError::MalformedTransaction(err.to_string())
    }
}

impl From<hex::FromHexError> for DecoderError {
    fn from(err: hex::FromHexError) -> Self {
        DecoderError::MalformedTransaction(format!("invalid hex: {}", err))
    }
}

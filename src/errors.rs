use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Esplora / price API operations
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Transaction decoding
    #[error("Decoder error: {0}")]
    Decoder(#[from] crate::decoder::DecoderError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// HTTP API error types (transaction ingestion and rate lookups)
#[derive(Error, Debug)]
pub enum ApiError {
    /// Could not build the HTTP client
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// Request failed (network error or non-success status)
    #[error("Request failed: {url} - {message}")]
    RequestFailed { url: String, message: String },

    /// Resource does not exist upstream (not retried)
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },

    /// Retry limit exceeded
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

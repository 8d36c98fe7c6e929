//! iRail client error types.

use super::convert::ConversionError;

/// Errors from the iRail HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum IrailError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The requested station, vehicle or composition does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but failed validation
    #[error("invalid response: {0}")]
    Conversion(#[from] ConversionError),

    /// Disk cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

impl IrailError {
    /// True if the error came from the upstream service rather than from us.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, IrailError::Cache { .. })
    }
}

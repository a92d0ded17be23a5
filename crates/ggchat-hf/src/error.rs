//! Internal error types for `HuggingFace` operations.
//!
//! These errors are internal to `ggchat-hf` and are mapped to the core
//! error taxonomy at the port boundary.

use ggchat_core::ChatError;
use thiserror::Error;

/// Result type alias for `HuggingFace` operations.
pub type HfResult<T> = Result<T, HfError>;

/// Errors related to `HuggingFace` API operations.
#[derive(Debug, Error)]
pub enum HfError {
    /// API request failed with an HTTP error status.
    #[error("HuggingFace API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from HuggingFace API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<HfError> for ChatError {
    fn from(err: HfError) -> Self {
        match err {
            HfError::ApiRequestFailed { .. } | HfError::Network(_) => Self::RegistryUnreachable {
                message: err.to_string(),
            },
            HfError::InvalidResponse { .. } | HfError::JsonParse(_) => Self::MalformedResponse {
                message: err.to_string(),
            },
        }
    }
}

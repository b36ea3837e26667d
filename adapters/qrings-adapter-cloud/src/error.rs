//! Error types for the cloud adapter.

use qrings_hal::ProviderError;
use thiserror::Error;

/// Result type for cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors that can occur when talking to the cloud service.
#[derive(Debug, Error)]
pub enum CloudError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The requested backend does not exist.
    #[error("Backend not found: {0}")]
    BackendNotFound(String),

    /// Base URL cannot carry a backend path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// API error response.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

impl CloudError {
    /// Network or authentication failure, as opposed to a bad response.
    pub fn is_connection(&self) -> bool {
        match self {
            CloudError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            CloudError::AuthFailed(_) => true,
            _ => false,
        }
    }
}

impl From<CloudError> for ProviderError {
    fn from(e: CloudError) -> Self {
        if e.is_connection() {
            ProviderError::Connection(e.to_string())
        } else {
            ProviderError::Other(e.to_string())
        }
    }
}

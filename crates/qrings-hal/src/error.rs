//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Configuration error (env file missing, unparsable, or incomplete).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A handle required to continue is absent after connecting.
    #[error("Session incomplete: no {0} handle was obtained")]
    SessionIncomplete(&'static str),

    /// The backend does not expose the requested attribute.
    #[error("attribute not reported by backend: {0}")]
    AttributeUnavailable(String),

    /// Unknown attribute name.
    #[error("Backend has no attribute '{0}'")]
    UnknownAttribute(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

/// Errors raised while talking to the external provider.
///
/// `Connection` covers network and authentication failures; everything
/// else lands in `Other`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or authentication failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure during construction or lookup.
    #[error("Provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether this is a network/authentication failure.
    pub fn is_connection(&self) -> bool {
        matches!(self, ProviderError::Connection(_))
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

//! Provider handle: an authenticated session to the cloud service.

use std::fmt;

use async_trait::async_trait;

use crate::backend::Backend;
use crate::credentials::Credentials;
use crate::error::ProviderResult;

/// Authenticated session to the external service.
///
/// Owned by the process for its lifetime; dropping it is the only teardown.
#[async_trait]
pub trait Provider: Send + Sync + fmt::Display {
    /// Interface version reported by the service.
    fn version(&self) -> u32;

    /// Names of the backends this session may request.
    fn backends(&self) -> &[String];

    /// Request a backend by name.
    async fn get_backend(&self, name: &str) -> ProviderResult<Box<dyn Backend>>;
}

/// Exchanges credentials for a [`Provider`].
///
/// Opening performs the authentication round trip; a failure there MUST
/// surface as [`ProviderError::Connection`](crate::ProviderError::Connection).
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    /// Open a provider session.
    async fn open(&self, credentials: &Credentials) -> ProviderResult<Box<dyn Provider>>;
}

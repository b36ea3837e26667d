//! Provider/backend bootstrap.
//!
//! ```text
//!   CredentialLoader ──→ get_provider() ──→ get_backend() ──→ Session
//!    (propagates)        (best-effort)      (best-effort)    (fatal if incomplete)
//! ```
//!
//! # Compatibility note
//!
//! `get_provider` and `get_backend` swallow construction failures and hand
//! back whatever handle exists, which is `None` on failure. Connection and
//! other provider errors are treated the same way. The check happens once,
//! in [`connect_to`], which refuses to return a half-built [`Session`].
//! This mirrors the behaviour the existing tooling relies on and is kept
//! as-is rather than tightened into per-step propagation.

use tracing::{info, warn};

use crate::backend::Backend;
use crate::credentials::{CredentialLoader, Credentials};
use crate::error::{HalError, HalResult};
use crate::provider::{Provider, ProviderFactory};

/// Device requested by [`connect`].
pub const DEFAULT_BACKEND: &str = "scarlet_quantum_rings";

/// A connected provider together with its backend.
pub struct Session {
    /// Authenticated provider handle.
    pub provider: Box<dyn Provider>,
    /// Backend obtained from the provider.
    pub backend: Box<dyn Backend>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("provider", &self.provider.to_string())
            .field("backend", &self.backend.to_string())
            .finish()
    }
}

/// Open a provider, returning `None` instead of an error on failure.
pub async fn get_provider(
    factory: &dyn ProviderFactory,
    credentials: &Credentials,
) -> Option<Box<dyn Provider>> {
    match factory.open(credentials).await {
        Ok(provider) => Some(provider),
        Err(e) => {
            if e.is_connection() {
                warn!("Could not reach provider: {}", e);
            } else {
                warn!("Provider construction failed: {}", e);
            }
            None
        }
    }
}

/// Request a backend, returning `None` instead of an error on failure.
pub async fn get_backend(provider: &dyn Provider, name: &str) -> Option<Box<dyn Backend>> {
    match provider.get_backend(name).await {
        Ok(backend) => Some(backend),
        Err(e) => {
            warn!("Backend '{}' unavailable: {}", name, e);
            None
        }
    }
}

/// Connect to [`DEFAULT_BACKEND`].
pub async fn connect(
    loader: &CredentialLoader,
    factory: &dyn ProviderFactory,
) -> HalResult<Session> {
    connect_to(loader, factory, DEFAULT_BACKEND).await
}

/// Load credentials, open a provider and request `backend_name`.
///
/// # Errors
///
/// Configuration errors from the loader propagate unchanged. A missing
/// provider or backend handle yields [`HalError::SessionIncomplete`], which
/// callers treat as fatal.
pub async fn connect_to(
    loader: &CredentialLoader,
    factory: &dyn ProviderFactory,
    backend_name: &str,
) -> HalResult<Session> {
    let credentials = loader.load()?;

    let provider = get_provider(factory, &credentials)
        .await
        .ok_or(HalError::SessionIncomplete("provider"))?;

    let backend = get_backend(provider.as_ref(), backend_name)
        .await
        .ok_or(HalError::SessionIncomplete("backend"))?;

    info!("Connected to {} ({} qubits)", backend.name(), backend.num_qubits());
    Ok(Session { provider, backend })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendProperties;
    use crate::error::{ProviderError, ProviderResult};
    use async_trait::async_trait;
    use std::fmt;
    use std::io::Write;

    struct FakeBackend(BackendProperties);

    impl fmt::Display for FakeBackend {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "FakeBackend({})", self.0.name)
        }
    }

    impl Backend for FakeBackend {
        fn properties(&self) -> &BackendProperties {
            &self.0
        }
    }

    struct FakeProvider {
        backends: Vec<String>,
    }

    impl fmt::Display for FakeProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "FakeProvider")
        }
    }

    #[async_trait]
    impl Provider for FakeProvider {
        fn version(&self) -> u32 {
            1
        }

        fn backends(&self) -> &[String] {
            &self.backends
        }

        async fn get_backend(&self, name: &str) -> ProviderResult<Box<dyn Backend>> {
            if self.backends.iter().any(|b| b == name) {
                Ok(Box::new(FakeBackend(BackendProperties::new(name, "0.9.0", 128))))
            } else {
                Err(ProviderError::Other(format!("no backend named {name}")))
            }
        }
    }

    enum Outcome {
        Ok,
        Refused,
        Broken,
    }

    struct FakeFactory(Outcome);

    #[async_trait]
    impl ProviderFactory for FakeFactory {
        async fn open(&self, credentials: &Credentials) -> ProviderResult<Box<dyn Provider>> {
            assert_eq!(credentials.name(), "alice");
            match self.0 {
                Outcome::Ok => Ok(Box::new(FakeProvider {
                    backends: vec![DEFAULT_BACKEND.to_string()],
                })),
                Outcome::Refused => Err(ProviderError::Connection("401 Unauthorized".into())),
                Outcome::Broken => Err(ProviderError::Other("bad payload".into())),
            }
        }
    }

    fn loader() -> (tempfile::NamedTempFile, CredentialLoader) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"NAME=alice\nTOKEN=secret\n").unwrap();
        let loader = CredentialLoader::new(file.path());
        (file, loader)
    }

    #[tokio::test]
    async fn test_connect_default_backend() {
        let (_file, loader) = loader();
        let session = connect(&loader, &FakeFactory(Outcome::Ok)).await.unwrap();
        assert_eq!(session.backend.name(), DEFAULT_BACKEND);
        assert_eq!(session.provider.version(), 1);
    }

    #[tokio::test]
    async fn test_get_provider_swallows_connection_error() {
        let creds = Credentials::new("alice", "secret").unwrap();
        assert!(get_provider(&FakeFactory(Outcome::Refused), &creds).await.is_none());
    }

    #[tokio::test]
    async fn test_get_provider_swallows_other_error() {
        let creds = Credentials::new("alice", "secret").unwrap();
        assert!(get_provider(&FakeFactory(Outcome::Broken), &creds).await.is_none());
    }

    #[tokio::test]
    async fn test_get_backend_swallows_unknown_name() {
        let provider = FakeProvider { backends: vec![] };
        assert!(get_backend(&provider, DEFAULT_BACKEND).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_fatal_without_provider() {
        let (_file, loader) = loader();
        let err = connect(&loader, &FakeFactory(Outcome::Refused))
            .await
            .unwrap_err();
        assert!(matches!(err, HalError::SessionIncomplete("provider")));
    }

    #[tokio::test]
    async fn test_connect_fatal_without_backend() {
        let (_file, loader) = loader();
        let err = connect_to(&loader, &FakeFactory(Outcome::Ok), "missing_device")
            .await
            .unwrap_err();
        assert!(matches!(err, HalError::SessionIncomplete("backend")));
    }

    #[tokio::test]
    async fn test_connect_propagates_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CredentialLoader::new(dir.path().join(".env"));
        let err = connect(&loader, &FakeFactory(Outcome::Ok)).await.unwrap_err();
        assert!(matches!(err, HalError::Configuration(_)));
    }
}

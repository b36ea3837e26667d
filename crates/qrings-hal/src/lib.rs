//! qrings Hardware Abstraction Layer
//!
//! This crate holds everything between a local `.env` file and a live
//! backend handle from the cloud service:
//!
//! - [`CredentialLoader`] reads `NAME` and `TOKEN` into [`Credentials`]
//! - [`Provider`] / [`ProviderFactory`] model the authenticated session
//! - [`Backend`] exposes a device's [`BackendProperties`] and [`CouplingMap`]
//! - [`connect`] chains the three into a [`Session`]
//! - [`inspect`] prints a diagnostic dump of a session
//!
//! # Example
//!
//! ```ignore
//! use qrings_hal::{CredentialLoader, connect, inspect};
//! use qrings_adapter_cloud::CloudProviderFactory;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let loader = CredentialLoader::new(".env").with_process_env();
//!     let factory = CloudProviderFactory::default();
//!
//!     let session = connect(&loader, &factory).await?;
//!     inspect::print_report(session.provider.as_ref(), session.backend.as_ref())?;
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Provider
//!
//! ```ignore
//! use qrings_hal::{Backend, Provider, ProviderResult};
//! use async_trait::async_trait;
//!
//! struct MyProvider {
//!     backends: Vec<String>,
//! }
//!
//! #[async_trait]
//! impl Provider for MyProvider {
//!     fn version(&self) -> u32 { 1 }
//!
//!     fn backends(&self) -> &[String] {
//!         &self.backends
//!     }
//!
//!     async fn get_backend(&self, name: &str) -> ProviderResult<Box<dyn Backend>> {
//!         // Fetch and cache the device properties
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod connect;
pub mod credentials;
pub mod error;
pub mod inspect;
pub mod provider;

pub use backend::{AttributeValue, BACKEND_ATTRIBUTES, Backend, BackendProperties, CouplingMap};
pub use connect::{DEFAULT_BACKEND, Session, connect, connect_to, get_backend, get_provider};
pub use credentials::{CredentialLoader, Credentials, DEFAULT_ENV_FILE, load_credentials};
pub use error::{HalError, HalResult, ProviderError, ProviderResult};
pub use provider::{Provider, ProviderFactory};

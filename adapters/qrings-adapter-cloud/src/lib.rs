//! qrings Adapter for the Quantum Rings cloud service
//!
//! Implements the [`Provider`](qrings_hal::Provider) and
//! [`Backend`](qrings_hal::Backend) contracts over the service's REST
//! surface. Opening a provider authenticates the account; requesting a
//! backend fetches and caches its properties and coupling map.
//!
//! # Authentication
//!
//! Credentials come from the `.env` file via
//! [`CredentialLoader`](qrings_hal::CredentialLoader):
//!
//! ```bash
//! NAME=<email for account>
//! TOKEN=rings-128.xxxxxxxx
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qrings_adapter_cloud::{CloudConfig, CloudProviderFactory};
//! use qrings_hal::{CredentialLoader, connect};
//!
//! let factory = CloudProviderFactory::new(CloudConfig::default());
//! let session = connect(&CredentialLoader::default(), &factory).await?;
//! println!("{}", session.backend);
//! ```

mod api;
mod backend;
mod error;

pub use api::{BASE_URL, CloudClient, ProviderResponse};
pub use backend::{CloudBackend, CloudConfig, CloudProvider, CloudProviderFactory};
pub use error::{CloudError, CloudResult};

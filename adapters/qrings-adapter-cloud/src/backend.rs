//! Provider and backend handles backed by the REST client.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use qrings_hal::{
    Backend, BackendProperties, Credentials, Provider, ProviderFactory, ProviderResult,
};

use crate::api::{BASE_URL, CloudClient};

/// Connection settings for the cloud service.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// API base URL.
    pub base_url: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
        }
    }
}

impl CloudConfig {
    /// Use a different API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Opens [`CloudProvider`] sessions.
#[derive(Debug, Clone, Default)]
pub struct CloudProviderFactory {
    config: CloudConfig,
}

impl CloudProviderFactory {
    /// Create a factory with explicit settings.
    pub fn new(config: CloudConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProviderFactory for CloudProviderFactory {
    async fn open(&self, credentials: &Credentials) -> ProviderResult<Box<dyn Provider>> {
        let provider = CloudProvider::connect(credentials, &self.config).await?;
        Ok(Box::new(provider))
    }
}

/// Authenticated session to the cloud service.
#[derive(Debug)]
pub struct CloudProvider {
    client: CloudClient,
    version: u32,
    backends: Vec<String>,
}

impl CloudProvider {
    /// Authenticate and fetch provider metadata.
    #[instrument(skip(credentials))]
    pub async fn connect(credentials: &Credentials, config: &CloudConfig) -> ProviderResult<Self> {
        let client = CloudClient::new(credentials)?.with_base_url(&config.base_url);
        let info = client.get_provider().await?;
        info!(
            "Authenticated as {} ({} backends)",
            credentials.name(),
            info.backends.len()
        );

        Ok(Self {
            client,
            version: info.version,
            backends: info.backends,
        })
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CloudProvider(version = {}, backends = [{}])",
            self.version,
            self.backends.join(", ")
        )
    }
}

#[async_trait]
impl Provider for CloudProvider {
    fn version(&self) -> u32 {
        self.version
    }

    fn backends(&self) -> &[String] {
        &self.backends
    }

    async fn get_backend(&self, name: &str) -> ProviderResult<Box<dyn Backend>> {
        let properties = self.client.get_backend(name).await?;
        debug!(
            "Backend {} reports {} qubits, {} couplings",
            properties.name,
            properties.num_qubits,
            properties.coupling_map.len()
        );
        Ok(Box::new(CloudBackend::new(properties)))
    }
}

/// A device handle with properties fetched at construction.
#[derive(Debug, Clone)]
pub struct CloudBackend {
    properties: BackendProperties,
}

impl CloudBackend {
    /// Wrap fetched properties.
    pub fn new(properties: BackendProperties) -> Self {
        Self { properties }
    }
}

impl fmt::Display for CloudBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.properties;
        write!(
            f,
            "Backend(backend_name = {}, backend_version = {}, online_date = {}, num_qubits = {})",
            p.name, p.backend_version, p.online_date, p.num_qubits
        )
    }
}

impl Backend for CloudBackend {
    fn properties(&self) -> &BackendProperties {
        &self.properties
    }
}

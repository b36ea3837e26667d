//! Shared helpers for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use qrings_adapter_cloud::{CloudConfig, CloudProviderFactory};
use qrings_hal::{CredentialLoader, Session, connect_to};

/// Where and how to connect, as given on the command line.
#[derive(Debug, Clone)]
pub struct Connection {
    pub env_file: PathBuf,
    pub endpoint: String,
    pub backend: String,
}

impl Connection {
    /// Credential loader for the configured env file. `NAME` / `TOKEN`
    /// already exported in the environment take precedence.
    pub fn loader(&self) -> CredentialLoader {
        CredentialLoader::new(&self.env_file).with_process_env()
    }

    /// Provider factory pointed at the configured endpoint.
    pub fn factory(&self) -> CloudProviderFactory {
        CloudProviderFactory::new(CloudConfig::default().with_base_url(&self.endpoint))
    }
}

/// Load credentials, open the provider and fetch the configured backend.
pub async fn open_session(connection: &Connection) -> Result<Session> {
    debug!(
        "Connecting to {} via {} (credentials from {})",
        connection.backend,
        connection.endpoint,
        connection.env_file.display()
    );
    connect_to(&connection.loader(), &connection.factory(), &connection.backend)
        .await
        .with_context(|| format!("Failed to connect to backend '{}'", connection.backend))
}

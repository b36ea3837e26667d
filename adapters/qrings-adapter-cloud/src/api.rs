//! REST client for the Quantum Rings cloud service.
//!
//! ## Endpoints
//!
//! 1. `GET /v1/provider` → provider version and the backends the account
//!    may use. This is the authentication round trip.
//! 2. `GET /v1/backends/{name}` → descriptive properties and coupling map
//!    of one backend.
//!
//! Every request carries `X-Account: <name>` and `Authorization: Bearer <token>`.
//! No client-side timeout is set; the service decides how long a call takes.

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use qrings_hal::{BackendProperties, Credentials};

use crate::error::{CloudError, CloudResult};

/// Cloud API base URL.
pub const BASE_URL: &str = "https://api.quantumrings.com";

/// API version path.
const API_PATH: &str = "/v1";

/// User agent string for qrings requests.
const USER_AGENT: &str = concat!("qrings/", env!("CARGO_PKG_VERSION"));

/// Cloud REST client.
#[derive(Clone)]
pub struct CloudClient {
    /// HTTP client.
    client: Client,
    /// API base URL.
    base_url: String,
    /// Account identifier.
    account: String,
    /// Secret token.
    token: String,
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("base_url", &self.base_url)
            .field("account", &self.account)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl CloudClient {
    /// Create a client for the given credentials.
    pub fn new(credentials: &Credentials) -> CloudResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(CloudError::Http)?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            account: credentials.name().to_string(),
            token: credentials.token().to_string(),
        })
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// API base URL in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PATH, path)
    }

    /// URL of one backend, with `name` percent-encoded as a single segment.
    fn backend_url(&self, name: &str) -> CloudResult<Url> {
        let mut url =
            Url::parse(&self.url("/backends")).map_err(|e| CloudError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| CloudError::InvalidUrl(self.base_url.clone()))?
            .push(name);
        Ok(url)
    }

    /// Fetch provider metadata; fails on bad credentials.
    #[instrument(skip(self))]
    pub async fn get_provider(&self) -> CloudResult<ProviderResponse> {
        let url = self.url("/provider");
        debug!("Getting provider from {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Account", &self.account)
            .bearer_auth(&self.token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch the properties of one backend.
    #[instrument(skip(self))]
    pub async fn get_backend(&self, name: &str) -> CloudResult<BackendProperties> {
        let url = self.backend_url(name)?;
        debug!("Getting backend from {}", url);

        let response = self
            .client
            .get(url)
            .header("X-Account", &self.account)
            .bearer_auth(&self.token)
            .send()
            .await?;

        match self.handle_response(response).await {
            Err(CloudError::BackendNotFound(_)) => {
                Err(CloudError::BackendNotFound(name.to_string()))
            }
            other => other,
        }
    }

    /// Handle HTTP response, extracting JSON or returning an error.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> CloudResult<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(classify_status(status, message))
        }
    }
}

/// Map a non-success status to an error.
fn classify_status(status: StatusCode, message: String) -> CloudError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CloudError::AuthFailed(message),
        StatusCode::NOT_FOUND => CloudError::BackendNotFound(message),
        _ => CloudError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

// ─── Response types ─────────────────────────────────────────────────

/// Provider metadata response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse {
    /// Interface version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Backends available to the account.
    #[serde(default)]
    pub backends: Vec<String>,
}

fn default_version() -> u32 {
    1
}

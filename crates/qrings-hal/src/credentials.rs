//! Credential loading from a local `.env` file.
//!
//! The file must exist and define `NAME` (account identifier) and `TOKEN`
//! (secret). Values are read into an explicit [`Credentials`] struct; the
//! process environment is never modified.
//!
//! ```text
//! NAME=someone@example.com
//! TOKEN=rings-128.xxxxxxxx
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HalError, HalResult};

/// Default env file, resolved against the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variable holding the account identifier.
pub const NAME_VAR: &str = "NAME";

/// Variable holding the secret token.
pub const TOKEN_VAR: &str = "TOKEN";

/// Account identifier and secret token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    name: String,
    token: String,
}

impl Credentials {
    /// Build credentials, rejecting empty values.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> HalResult<Self> {
        let name = name.into();
        let token = token.into();
        if token.is_empty() {
            return Err(HalError::Configuration(format!("{TOKEN_VAR} is not set")));
        }
        if name.is_empty() {
            return Err(HalError::Configuration(format!("{NAME_VAR} is not set")));
        }
        Ok(Self { name, token })
    }

    /// Account identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secret token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `(name, token)` in that order.
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Reads [`Credentials`] from an env file.
#[derive(Debug, Clone)]
pub struct CredentialLoader {
    env_file: PathBuf,
    process_env: bool,
    name_override: Option<String>,
    token_override: Option<String>,
}

impl Default for CredentialLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl CredentialLoader {
    /// Create a loader for the given env file.
    pub fn new(env_file: impl Into<PathBuf>) -> Self {
        Self {
            env_file: env_file.into(),
            process_env: false,
            name_override: None,
            token_override: None,
        }
    }

    /// Let `NAME` / `TOKEN` already present in the process environment win
    /// over the file, the way a non-overriding dotenv load behaves.
    pub fn with_process_env(mut self) -> Self {
        self.process_env = true;
        self.name_override = std::env::var(NAME_VAR).ok();
        self.token_override = std::env::var(TOKEN_VAR).ok();
        self
    }

    /// Whether values from the process environment take precedence.
    pub fn honours_process_env(&self) -> bool {
        self.process_env
    }

    /// Path of the env file this loader reads.
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Load the credentials.
    ///
    /// # Errors
    ///
    /// [`HalError::Configuration`] when the file is missing or unparsable,
    /// or when `TOKEN` or `NAME` is absent or empty.
    pub fn load(&self) -> HalResult<Credentials> {
        if !self.env_file.exists() {
            return Err(HalError::Configuration(format!(
                "{} file is not found",
                self.env_file.display()
            )));
        }

        let iter = dotenvy::from_path_iter(&self.env_file).map_err(|e| {
            HalError::Configuration(format!(
                "failed to read {}: {e}",
                self.env_file.display()
            ))
        })?;

        let mut name = None;
        let mut token = None;
        for item in iter {
            let (key, value) = item.map_err(|e| {
                HalError::Configuration(format!(
                    "failed to parse {}: {e}",
                    self.env_file.display()
                ))
            })?;
            match key.as_str() {
                NAME_VAR => name = Some(value),
                TOKEN_VAR => token = Some(value),
                _ => {}
            }
        }

        let name = self.name_override.clone().or(name).unwrap_or_default();
        let token = self.token_override.clone().or(token).unwrap_or_default();

        debug!("Loaded credentials from {}", self.env_file.display());
        Credentials::new(name, token)
    }
}

/// Load credentials from `.env` in the working directory, honouring the
/// process environment.
pub fn load_credentials() -> HalResult<(String, String)> {
    CredentialLoader::default()
        .with_process_env()
        .load()
        .map(Credentials::into_pair)
}

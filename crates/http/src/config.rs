//! Configuration for the session client

use crate::client::{DEFAULT_PROFILES_TABLE, SessionClient};
use crate::ClientError;
use authstate_core::config::ENV_PREFIX;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Session client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://xyz.example.co`
    pub base_url: String,

    /// Public API key sent with every request
    pub api_key: String,

    /// Token of an already established session
    #[serde(default)]
    pub access_token: Option<String>,

    /// Table holding `first_name`/`last_name` keyed by user id
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_profiles_table() -> String {
    DEFAULT_PROFILES_TABLE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
            profiles_table: default_profiles_table(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from file, with `AUTHSTATE_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or fails validation
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTHSTATE_BASE_URL` or `AUTHSTATE_API_KEY` is missing
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Message("api_key must not be empty".to_string()));
        }
        if self.profiles_table.trim().is_empty() {
            return Err(ConfigError::Message(
                "profiles_table must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl SessionClient {
    /// Build a client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Self::builder()
            .base_url(&config.base_url)
            .api_key(&config.api_key)
            .profiles_table(&config.profiles_table)
            .timeout(Duration::from_secs(config.timeout_secs));

        if let Some(token) = &config.access_token {
            builder = builder.access_token(token);
        }

        builder.build()
    }
}

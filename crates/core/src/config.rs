//! Configuration for the auth state manager

use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix shared by all authstate settings
pub const ENV_PREFIX: &str = "AUTHSTATE";

/// What a refresh resolves to when the identity exists but its profile row does not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingProfilePolicy {
    /// Signed in, with an empty display name
    #[default]
    BlankName,
    /// Treated as if no session existed
    SignedOut,
}

/// Auth state manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Route navigated to (replacing history) after sign-out
    pub landing_route: String,

    /// Resolution for an identity without a profile row
    pub missing_profile: MissingProfilePolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            landing_route: "/".to_string(),
            missing_profile: MissingProfilePolicy::default(),
        }
    }
}

impl ManagerConfig {
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

    /// Load configuration from defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Set the landing route
    #[must_use]
    pub fn with_landing_route(mut self, route: impl Into<String>) -> Self {
        self.landing_route = route.into();
        self
    }

    /// Set the missing-profile policy
    #[must_use]
    pub const fn with_missing_profile(mut self, policy: MissingProfilePolicy) -> Self {
        self.missing_profile = policy;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the landing route is not an absolute path
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.landing_route.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "landing_route must be an absolute path, got '{}'",
                self.landing_route
            )));
        }
        Ok(())
    }
}

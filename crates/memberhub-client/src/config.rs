//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration for the HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,

    /// Request timeout in seconds (default: 30). Beyond this there are no
    /// retries and no cancellation; the platform request lifecycle applies.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent header (default: "memberhub-client").
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "memberhub-client".to_string()
}

/// Errors that can occur during client configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is empty.
    #[error("Invalid base URL: must not be empty")]
    EmptyBaseUrl,

    /// Invalid timeout (must be > 0).
    #[error("Invalid timeout: must be greater than 0")]
    InvalidTimeout,
}

impl ClientConfig {
    /// Create a configuration for the given base URL with defaults.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("http://localhost:5000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.user_agent, "memberhub-client");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_base_url() {
        let config = ClientConfig::new("  ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBaseUrl)));
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let mut config = ClientConfig::new("http://localhost:5000");
        config.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "https://memberhub.example.org"}"#).unwrap();
        assert_eq!(config.base_url, "https://memberhub.example.org");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}

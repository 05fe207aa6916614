//! Configuration management for the todolists client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::api::{parse_base_url, ApiConfig, LoginParams, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;
use todolists_runtime::StoreConfig;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `TODOLISTS_API_URL` is not a usable base URL
    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl {
        /// The configured value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A numeric setting is out of range
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// Environment variable name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection
    pub backend: BackendConfig,
    /// Store runtime
    pub store: RuntimeConfig,
    /// Demo login credentials
    pub credentials: CredentialsConfig,
    /// Log filter (`RUST_LOG` syntax)
    pub log_level: String,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST API
    pub url: String,
    /// Value of the `API-KEY` header
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

/// Store runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Capacity of the action broadcast channel
    pub broadcast_capacity: usize,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Credentials used by the demo binary when no session exists
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Account email
    pub email: Option<String>,
    /// Account password
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend: BackendConfig {
                url: lookup("TODOLISTS_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                api_key: lookup("TODOLISTS_API_KEY").filter(|key| !key.is_empty()),
                request_timeout: lookup("TODOLISTS_REQUEST_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            store: RuntimeConfig {
                broadcast_capacity: lookup("TODOLISTS_BROADCAST_CAPACITY")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(16),
                shutdown_timeout: lookup("TODOLISTS_SHUTDOWN_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            },
            credentials: CredentialsConfig {
                email: lookup("TODOLISTS_EMAIL"),
                password: lookup("TODOLISTS_PASSWORD"),
            },
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "todolists=info".to_string()),
        }
    }

    /// Check the settings that would otherwise fail later at runtime.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidUrl`] if the API URL cannot serve as a base URL
    /// - [`ConfigError::InvalidValue`] if the timeout or channel capacity is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url(&self.backend.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.backend.url.clone(),
            reason: e.message(),
        })?;

        if self.backend.request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                name: "TODOLISTS_REQUEST_TIMEOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.store.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "TODOLISTS_BROADCAST_CAPACITY",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Settings for [`crate::api::HttpApi`]
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.backend.url.clone(),
            api_key: self.backend.api_key.clone(),
            timeout: Duration::from_secs(self.backend.request_timeout),
        }
    }

    /// Settings for the store runtime
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.store.broadcast_capacity,
            Duration::from_secs(self.store.shutdown_timeout),
        )
    }

    /// Demo credentials, when both email and password are set
    #[must_use]
    pub fn login_params(&self) -> Option<LoginParams> {
        match (&self.credentials.email, &self.credentials.password) {
            (Some(email), Some(password)) => Some(LoginParams::new(email, password, true)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.backend.url, DEFAULT_BASE_URL);
        assert_eq!(config.backend.api_key, None);
        assert_eq!(config.backend.request_timeout, 10);
        assert_eq!(config.store.broadcast_capacity, 16);
        assert_eq!(config.store.shutdown_timeout, 5);
        assert_eq!(config.log_level, "todolists=info");
        assert!(config.login_params().is_none());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TODOLISTS_API_URL", "http://localhost:3000/api"),
            ("TODOLISTS_API_KEY", "secret-key"),
            ("TODOLISTS_REQUEST_TIMEOUT_SECS", "3"),
            ("TODOLISTS_BROADCAST_CAPACITY", "64"),
            ("TODOLISTS_EMAIL", "free@samuraijs.com"),
            ("TODOLISTS_PASSWORD", "free"),
        ]);

        let api = config.api_config();
        assert_eq!(api.base_url, "http://localhost:3000/api");
        assert_eq!(api.api_key.as_deref(), Some("secret-key"));
        assert_eq!(api.timeout, Duration::from_secs(3));
        assert_eq!(config.store_config().broadcast_capacity, 64);

        let params = config.login_params().unwrap();
        assert_eq!(params.email, "free@samuraijs.com");
        assert!(params.remember_me);
    }

    #[test]
    fn test_unparsable_numbers_fall_back_to_defaults() {
        let config = config_from(&[("TODOLISTS_REQUEST_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.backend.request_timeout, 10);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = config_from(&[("TODOLISTS_API_URL", "not a url")]);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = config_from(&[("TODOLISTS_BROADCAST_CAPACITY", "0")]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                name: "TODOLISTS_BROADCAST_CAPACITY",
                ..
            })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = config_from(&[("TODOLISTS_PASSWORD", "hunter2")]);
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}

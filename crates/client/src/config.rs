//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MAEJANG_API_BASE_URL` - REST API origin (e.g., <https://pizzaschool.maejang.com>)
//!
//! ## Optional
//! - `MAEJANG_STORAGE_DIR` - Directory for persisted local state; in-memory
//!   storage is used when unset
//! - `MAEJANG_DEV_SUBDOMAIN` - Tenant alias for loopback hostnames
//!   (default: pizzaschool). Never applied to production hostnames.
//! - `MAEJANG_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `TOSS_CLIENT_KEY` - Payment widget client key, handed to the widget

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEV_SUBDOMAIN: &str = "pizzaschool";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client SDK configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// REST API origin; endpoint paths are joined under `/api/v1/`.
    pub api_base_url: Url,
    /// Directory for the file-backed store; `None` selects in-memory.
    pub storage_dir: Option<PathBuf>,
    /// Tenant alias used when the hostname is a loopback address.
    pub dev_subdomain: String,
    /// Bound on every in-flight request; expiry aborts the call as a
    /// network failure.
    pub http_timeout: Duration,
    /// Payment widget client key.
    pub toss_client_key: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("storage_dir", &self.storage_dir)
            .field("dev_subdomain", &self.dev_subdomain)
            .field("http_timeout", &self.http_timeout)
            .field(
                "toss_client_key",
                &self.toss_client_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("MAEJANG_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MAEJANG_API_BASE_URL".to_string(), e.to_string())
            })?;

        let storage_dir = get_optional_env("MAEJANG_STORAGE_DIR").map(PathBuf::from);

        let dev_subdomain = get_env_or_default("MAEJANG_DEV_SUBDOMAIN", DEFAULT_DEV_SUBDOMAIN);

        let timeout_secs = get_env_or_default(
            "MAEJANG_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("MAEJANG_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        let toss_client_key = get_optional_env("TOSS_CLIENT_KEY").map(SecretString::from);

        Ok(Self {
            api_base_url,
            storage_dir,
            dev_subdomain,
            http_timeout: Duration::from_secs(timeout_secs),
            toss_client_key,
        })
    }

    /// Build a configuration directly, for tests and embedders.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base_url` is not a valid URL.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let api_base_url = api_base_url.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("api_base_url".to_string(), e.to_string())
        })?;
        Ok(Self {
            api_base_url,
            storage_dir: None,
            dev_subdomain: DEFAULT_DEV_SUBDOMAIN.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            toss_client_key: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = ClientConfig::new("https://pizzaschool.maejang.com").unwrap();
        assert_eq!(config.dev_subdomain, "pizzaschool");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(ClientConfig::new("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_toss_key() {
        let mut config = ClientConfig::new("https://maejang.com").unwrap();
        config.toss_client_key = Some(SecretString::from("test_ck_live_abcdef"));
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("test_ck_live_abcdef"));
    }
}

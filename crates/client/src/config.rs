//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FARM_DIRECT_API_ROOT_URL` - Root URL of the marketplace REST API
//!   (e.g., `https://api.farmdirect.example/api/v1`)
//!
//! ## Optional
//! - `FARM_DIRECT_SESSION_FILE` - Where the login session is persisted
//!   (default: `.farm-direct/session.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default location of the persisted session file.
pub const DEFAULT_SESSION_FILE: &str = ".farm-direct/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Marketplace client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL every endpoint path is appended to.
    ///
    /// Stored exactly as configured; endpoints are joined by plain
    /// concatenation.
    pub api_root_url: String,
    /// File holding the persisted session records.
    pub session_file: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API root is missing or is not an
    /// absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_root_url = get_required_env("FARM_DIRECT_API_ROOT_URL")?;
        validate_api_root("FARM_DIRECT_API_ROOT_URL", &api_root_url)?;

        let session_file = PathBuf::from(get_env_or_default(
            "FARM_DIRECT_SESSION_FILE",
            DEFAULT_SESSION_FILE,
        ));

        Ok(Self {
            api_root_url,
            session_file,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for a given API root with every optional value unset.
    #[must_use]
    pub fn new(api_root_url: impl Into<String>) -> Self {
        Self {
            api_root_url: api_root_url.into(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Check that the API root is an absolute http(s) URL.
fn validate_api_root(var_name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{other}', expected http or https"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_root_accepts_http_urls() {
        assert!(validate_api_root("TEST_VAR", "http://localhost:8000").is_ok());
        assert!(validate_api_root("TEST_VAR", "https://api.example.com/v1").is_ok());
    }

    #[test]
    fn test_validate_api_root_rejects_relative_path() {
        let err = validate_api_root("TEST_VAR", "/api").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "TEST_VAR"));
    }

    #[test]
    fn test_validate_api_root_rejects_other_schemes() {
        let err = validate_api_root("TEST_VAR", "ftp://files.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_new_uses_default_session_file() {
        let config = ClientConfig::new("http://localhost:8000");
        assert_eq!(config.api_root_url, "http://localhost:8000");
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        assert!(config.sentry_dsn.is_none());
    }
}

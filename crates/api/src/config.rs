//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FEIRA_API_URL` - Backend base URL including the `/api` prefix
//!   (default: `https://api.feiralivre.app/api`)
//! - `FEIRA_SESSION_FILE` - Path of the persisted session document
//!   (default: `$HOME/.feira-livre/session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.feiralivre.app/api";
const SESSION_FILE_NAME: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Cannot resolve a session file path; set FEIRA_SESSION_FILE or HOME")]
    NoSessionPath,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, including the `/api` prefix.
    pub base_url: Url,
    /// Where the session document (user + bearer token) is persisted.
    pub session_path: PathBuf,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `FEIRA_API_URL` is not a valid URL, or if no
    /// session file path can be resolved.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_url = get_env_or_default("FEIRA_API_URL", DEFAULT_API_URL);
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("FEIRA_API_URL".to_string(), e.to_string()))?;

        let session_path = match std::env::var("FEIRA_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_path().ok_or(ConfigError::NoSessionPath)?,
        };

        Ok(Self {
            base_url,
            session_path,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Default session path under the user's home directory.
fn default_session_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".feira-livre").join(SESSION_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_parses() {
        let url = Url::parse(DEFAULT_API_URL).expect("default URL must be valid");
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("FEIRA_DOES_NOT_EXIST", "fallback"),
            "fallback"
        );
    }
}

//! Engine connection configuration.
//!
//! Resolved once at client-construction time. A missing endpoint or the
//! absence of any valid credential form is a fatal configuration error,
//! raised here and never swallowed.

use std::env;

use crate::errors::EngineError;

/// Environment variable holding the engine endpoint URL.
pub const ENV_URL: &str = "OPENSEARCH_URL";
/// Environment variable holding the API key id.
pub const ENV_API_KEY_ID: &str = "OPENSEARCH_API_KEY_ID";
/// Environment variable holding the API key secret.
pub const ENV_API_KEY: &str = "OPENSEARCH_API_KEY";
/// Environment variable holding the basic-auth username.
pub const ENV_USERNAME: &str = "OPENSEARCH_USERNAME";
/// Environment variable holding the basic-auth password.
pub const ENV_PASSWORD: &str = "OPENSEARCH_PASSWORD";

/// Credential forms accepted by the engine.
///
/// API keys take priority over basic auth when both are configured.
#[derive(Debug, Clone)]
pub enum EngineCredentials {
    /// API key pair (id + secret).
    ApiKey { id: String, key: String },
    /// Username/password basic auth.
    Basic { username: String, password: String },
}

/// Connection configuration for the engine client.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine endpoint URL (e.g. "http://localhost:9200").
    pub url: String,
    /// Credentials used for every request.
    pub credentials: EngineCredentials,
}

impl EngineConfig {
    /// Create a configuration from explicit values.
    pub fn new(url: impl Into<String>, credentials: EngineCredentials) -> Self {
        Self {
            url: url.into(),
            credentials,
        }
    }

    /// Resolve the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: engine endpoint (required)
    /// - `OPENSEARCH_API_KEY_ID` + `OPENSEARCH_API_KEY`: API key pair
    /// - `OPENSEARCH_USERNAME` + `OPENSEARCH_PASSWORD`: basic auth pair
    ///
    /// One complete credential pair is required; the API key pair wins
    /// when both are present.
    ///
    /// # Errors
    ///
    /// * `EngineError::ConfigError` - If the endpoint is missing or no
    ///   complete credential pair is configured.
    pub fn from_env() -> Result<Self, EngineError> {
        let url = env::var(ENV_URL)
            .map_err(|_| EngineError::config(format!("{} is not set", ENV_URL)))?;

        let credentials = Self::credentials_from_env()?;

        Ok(Self { url, credentials })
    }

    fn credentials_from_env() -> Result<EngineCredentials, EngineError> {
        if let (Ok(id), Ok(key)) = (env::var(ENV_API_KEY_ID), env::var(ENV_API_KEY)) {
            return Ok(EngineCredentials::ApiKey { id, key });
        }

        if let (Ok(username), Ok(password)) = (env::var(ENV_USERNAME), env::var(ENV_PASSWORD)) {
            return Ok(EngineCredentials::Basic { username, password });
        }

        Err(EngineError::config(format!(
            "no engine credentials configured: set {}+{} or {}+{}",
            ENV_API_KEY_ID, ENV_API_KEY, ENV_USERNAME, ENV_PASSWORD
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = EngineConfig::new(
            "http://localhost:9200",
            EngineCredentials::Basic {
                username: "admin".to_string(),
                password: "admin".to_string(),
            },
        );
        assert_eq!(config.url, "http://localhost:9200");
        assert!(matches!(config.credentials, EngineCredentials::Basic { .. }));
    }
}

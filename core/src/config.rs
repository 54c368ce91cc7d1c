//! Client configuration: where the API lives and how to authenticate.
//!
//! Credentials are always supplied by the caller, either directly or through
//! the environment.

use std::fmt;
use std::time::Duration;

/// Pre-production environment of the money-transfer API.
pub const DEFAULT_BASE_URL: &str = "https://api-mt.pre.thunes.com";

pub const ENV_BASE_URL: &str = "THUNES_BASE_URL";
pub const ENV_API_KEY: &str = "THUNES_API_KEY";
pub const ENV_API_SECRET: &str = "THUNES_API_SECRET";
pub const ENV_TIMEOUT_SECS: &str = "THUNES_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Base URL, API key/secret pair and an optional per-call timeout.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `THUNES_API_KEY` and `THUNES_API_SECRET` (required),
    /// `THUNES_BASE_URL` (defaults to the pre-production URL) and
    /// `THUNES_TIMEOUT_SECS` (optional, whole seconds).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => {
                let secs = value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    name: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: required(ENV_API_KEY)?,
            api_secret: required(ENV_API_SECRET)?,
            timeout,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

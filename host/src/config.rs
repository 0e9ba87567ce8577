//! Host configuration. The base URL is the only setting.

use crate::error::ConfigError;

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "USERS_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub base_url: String,
}

impl HostConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        Ok(Self { base_url })
    }

    /// Read `USERS_API_URL`, falling back to `DEFAULT_BASE_URL` when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(BASE_URL_ENV) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

//! Session client configuration.

use std::time::Duration;

use crate::error::SessionError;

pub const ENV_API_BASE_URL: &str = "INNKEEP_API_BASE_URL";
pub const ENV_PAYMENT_PUBLISHABLE_KEY: &str = "INNKEEP_PAYMENT_PUBLISHABLE_KEY";
pub const ENV_VERIFY_TIMEOUT_SECS: &str = "INNKEEP_VERIFY_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the API serving the verification endpoint.
    pub api_base_url: String,
    /// Payment provider publishable key. `None` yields an unusable
    /// payment client instead of an error.
    pub payment_publishable_key: Option<String>,
    /// Upper bound on the single verification call.
    pub verify_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:7000".into(),
            payment_publishable_key: None,
            verify_timeout: Duration::from_secs(10),
        }
    }
}

impl SessionConfig {
    /// Read the configuration from process environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            url::Url::parse(&url)?;
            config.api_base_url = url;
        }

        config.payment_publishable_key = lookup(ENV_PAYMENT_PUBLISHABLE_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(secs) = lookup(ENV_VERIFY_TIMEOUT_SECS) {
            let secs = secs.parse::<u64>().map_err(|e| {
                SessionError::Config(format!("{ENV_VERIFY_TIMEOUT_SECS}: {e}"))
            })?;
            config.verify_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

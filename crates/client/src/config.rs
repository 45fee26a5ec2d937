//! Client configuration (environment driven).

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const API_URL_VAR: &str = "STOREFRONT_API_URL";
pub const TIMEOUT_VAR: &str = "STOREFRONT_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the catalog API, without a trailing slash.
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Read `STOREFRONT_API_URL` and `STOREFRONT_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.api_url);

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "{} is not a positive integer; using default", TIMEOUT_VAR);
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_url: normalize_url(&api_url),
            timeout,
        }
    }

    pub fn with_api_url(mut self, api_url: impl AsRef<str>) -> Self {
        self.api_url = normalize_url(api_url.as_ref());
        self
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

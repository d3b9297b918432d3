//! Client configuration.
//!
//! The base URL is read once by the host (environment, `.env`, or a flag) and
//! handed to `AnalysisClient` as a plain value. Nothing in the core reads the
//! environment on its own after startup.

use std::time::Duration;

/// Environment variable naming the analysis service base URL.
pub const API_URL_ENV: &str = "FOOD_API_URL";

/// Used when `FOOD_API_URL` is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied by the host transport; the core itself never waits.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. A missing or blank base URL falls
    /// back to `DEFAULT_BASE_URL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_ENV)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_env_uses_default() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://localhost:3002");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn blank_env_uses_default() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn env_value_is_used() {
        let config = ClientConfig::from_lookup(|key| {
            (key == API_URL_ENV).then(|| "https://food.example.com".to_string())
        });
        assert_eq!(config.base_url, "https://food.example.com");
    }
}

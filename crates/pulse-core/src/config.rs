//! Configuration for the stock query pipeline

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// Alpha Vantage free tier allows 5 requests per minute.
pub const DEFAULT_ALPHA_VANTAGE_RATE_LIMIT: u32 = 5;

/// Conservative per-minute quota for the news provider.
pub const DEFAULT_NEWS_RATE_LIMIT: u32 = 30;

/// Configuration for one pipeline instance.
///
/// Credentials are injected here at construction time and handed to each
/// client when it is built; nothing reads process environment at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Maximum number of headlines to request from the news provider
    pub headline_limit: usize,

    /// Trailing window for the price-change computation, in trading days
    pub window_days: usize,

    /// Deadline applied to each outbound fetch; an elapsed fetch is
    /// abandoned and reported as a failure, never retried in-request
    pub request_timeout: Duration,

    /// News provider API key
    pub news_api_key: Option<String>,

    /// Alpha Vantage API key
    pub alpha_vantage_api_key: Option<String>,

    /// News provider requests per minute
    pub news_rate_limit: u32,

    /// Alpha Vantage requests per minute
    pub alpha_vantage_rate_limit: u32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            headline_limit: 5,
            window_days: 7,
            request_timeout: Duration::from_secs(10),
            news_api_key: None,
            alpha_vantage_api_key: None,
            news_rate_limit: DEFAULT_NEWS_RATE_LIMIT,
            alpha_vantage_rate_limit: DEFAULT_ALPHA_VANTAGE_RATE_LIMIT,
        }
    }
}

impl PulseConfig {
    /// Create a new configuration builder
    pub fn builder() -> PulseConfigBuilder {
        PulseConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.headline_limit == 0 {
            return Err(PulseError::Config(
                "headline_limit must be greater than 0".to_string(),
            ));
        }

        if self.window_days == 0 {
            return Err(PulseError::Config(
                "window_days must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(PulseError::Config(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The news API key, or a configuration error naming what is missing
    pub fn require_news_api_key(&self) -> Result<&str> {
        self.news_api_key
            .as_deref()
            .ok_or_else(|| PulseError::Config("news API key is required".to_string()))
    }

    /// The Alpha Vantage API key, or a configuration error naming what is
    /// missing
    pub fn require_alpha_vantage_api_key(&self) -> Result<&str> {
        self.alpha_vantage_api_key
            .as_deref()
            .ok_or_else(|| PulseError::Config("Alpha Vantage API key is required".to_string()))
    }
}

/// Builder for [`PulseConfig`]
#[derive(Debug, Default)]
pub struct PulseConfigBuilder {
    headline_limit: Option<usize>,
    window_days: Option<usize>,
    request_timeout: Option<Duration>,
    news_api_key: Option<String>,
    alpha_vantage_api_key: Option<String>,
    news_rate_limit: Option<u32>,
    alpha_vantage_rate_limit: Option<u32>,
}

impl PulseConfigBuilder {
    /// Set the maximum number of headlines to fetch
    pub fn headline_limit(mut self, limit: usize) -> Self {
        self.headline_limit = Some(limit);
        self
    }

    /// Set the trailing window in trading days
    pub fn window_days(mut self, days: usize) -> Self {
        self.window_days = Some(days);
        self
    }

    /// Set the per-fetch deadline
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the news provider API key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the news provider per-minute quota
    pub fn news_rate_limit(mut self, per_minute: u32) -> Self {
        self.news_rate_limit = Some(per_minute);
        self
    }

    /// Set the Alpha Vantage per-minute quota
    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    /// Load credentials from `NEWS_API_KEY` and `ALPHA_VANTAGE_API_KEY`.
    ///
    /// Environment access is confined to this construction-time helper.
    pub fn with_env_api_keys(mut self) -> Self {
        if let Ok(key) = std::env::var("NEWS_API_KEY") {
            self.news_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            self.alpha_vantage_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PulseConfig> {
        let defaults = PulseConfig::default();

        let config = PulseConfig {
            headline_limit: self.headline_limit.unwrap_or(defaults.headline_limit),
            window_days: self.window_days.unwrap_or(defaults.window_days),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            news_api_key: self.news_api_key,
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            news_rate_limit: self.news_rate_limit.unwrap_or(defaults.news_rate_limit),
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PulseConfig::default();
        assert_eq!(config.headline_limit, 5);
        assert_eq!(config.window_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PulseConfig::builder()
            .window_days(14)
            .headline_limit(3)
            .request_timeout(Duration::from_secs(5))
            .news_api_key("news-key")
            .alpha_vantage_api_key("alpha-key")
            .build()
            .expect("valid config");

        assert_eq!(config.window_days, 14);
        assert_eq!(config.headline_limit, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.news_api_key.as_deref(), Some("news-key"));
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let err = PulseConfig::builder().window_days(0).build();
        assert!(err.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_headline_limit() {
        let err = PulseConfig::builder().headline_limit(0).build();
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_credentials_are_reported() {
        let config = PulseConfig::default();
        assert!(config.require_news_api_key().is_err());
        assert!(config.require_alpha_vantage_api_key().is_err());
    }
}

//! Configuration for stock lookups
//!
//! Loaded once at startup and shared as `Arc<StockConfig>`; nothing re-reads
//! the environment afterwards.

use crate::change::Timeframe;
use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the Alpha Vantage key
pub const ALPHA_VANTAGE_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";

/// Environment variable holding the NewsAPI key
pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";

const DEFAULT_ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// NewsAPI rejects page sizes above this
const MAX_NEWS_PAGE_SIZE: u32 = 100;

/// Configuration for stock lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Alpha Vantage API key; market data is unavailable without it
    pub alpha_vantage_api_key: Option<String>,

    /// NewsAPI key; news lookups return an empty feed without it
    pub news_api_key: Option<String>,

    /// Alpha Vantage query endpoint
    pub alpha_vantage_base_url: String,

    /// NewsAPI `everything` endpoint
    pub news_api_base_url: String,

    /// Timeout for each market-data request
    pub market_timeout: Duration,

    /// Timeout for each news request
    pub news_timeout: Duration,

    /// Local Alpha Vantage quota; calls beyond it fail immediately
    pub alpha_vantage_requests_per_minute: u32,

    /// Number of articles requested from NewsAPI
    pub news_page_size: u32,

    /// Timeframe used when a caller does not name one
    pub default_timeframe: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            news_api_key: None,
            alpha_vantage_base_url: DEFAULT_ALPHA_VANTAGE_URL.to_string(),
            news_api_base_url: DEFAULT_NEWS_API_URL.to_string(),
            market_timeout: Duration::from_secs(15),
            news_timeout: Duration::from_secs(10),
            alpha_vantage_requests_per_minute: 5, // free tier
            news_page_size: 5,
            default_timeframe: "1week".to_string(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Default configuration with API keys read from the environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env_api_keys().build()
    }

    /// Whether market data can be fetched
    pub fn has_market_data(&self) -> bool {
        self.alpha_vantage_api_key.is_some()
    }

    /// Whether news can be fetched
    pub fn has_news(&self) -> bool {
        self.news_api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.alpha_vantage_requests_per_minute == 0 {
            return Err(StockError::ConfigError(
                "alpha_vantage_requests_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.news_page_size == 0 || self.news_page_size > MAX_NEWS_PAGE_SIZE {
            return Err(StockError::ConfigError(format!(
                "news_page_size must be between 1 and {MAX_NEWS_PAGE_SIZE}"
            )));
        }

        if self.market_timeout.is_zero() || self.news_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request timeouts must be greater than 0".to_string(),
            ));
        }

        self.default_timeframe
            .parse::<Timeframe>()
            .map_err(|e| StockError::ConfigError(format!("default_timeframe: {e}")))?;

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    news_api_key: Option<String>,
    alpha_vantage_base_url: Option<String>,
    news_api_base_url: Option<String>,
    market_timeout: Option<Duration>,
    news_timeout: Option<Duration>,
    alpha_vantage_requests_per_minute: Option<u32>,
    news_page_size: Option<u32>,
    default_timeframe: Option<String>,
}

impl StockConfigBuilder {
    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set NewsAPI key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Load both API keys from the environment
    ///
    /// Keys already set on the builder are kept when the variable is unset.
    pub fn with_env_api_keys(mut self) -> Self {
        if let Some(key) = agent_utils::env::read_key(ALPHA_VANTAGE_KEY_VAR) {
            self.alpha_vantage_api_key = Some(key);
        }
        if let Some(key) = agent_utils::env::read_key(NEWS_API_KEY_VAR) {
            self.news_api_key = Some(key);
        }
        self
    }

    /// Override the Alpha Vantage endpoint
    pub fn alpha_vantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_vantage_base_url = Some(url.into());
        self
    }

    /// Override the NewsAPI endpoint
    pub fn news_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.news_api_base_url = Some(url.into());
        self
    }

    /// Set market-data request timeout
    pub fn market_timeout(mut self, duration: Duration) -> Self {
        self.market_timeout = Some(duration);
        self
    }

    /// Set news request timeout
    pub fn news_timeout(mut self, duration: Duration) -> Self {
        self.news_timeout = Some(duration);
        self
    }

    /// Set the local Alpha Vantage quota
    pub fn alpha_vantage_requests_per_minute(mut self, limit: u32) -> Self {
        self.alpha_vantage_requests_per_minute = Some(limit);
        self
    }

    /// Set the number of articles requested
    pub fn news_page_size(mut self, size: u32) -> Self {
        self.news_page_size = Some(size);
        self
    }

    /// Set the default timeframe keyword
    pub fn default_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.default_timeframe = Some(timeframe.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            news_api_key: self.news_api_key,
            alpha_vantage_base_url: self
                .alpha_vantage_base_url
                .unwrap_or(defaults.alpha_vantage_base_url),
            news_api_base_url: self.news_api_base_url.unwrap_or(defaults.news_api_base_url),
            market_timeout: self.market_timeout.unwrap_or(defaults.market_timeout),
            news_timeout: self.news_timeout.unwrap_or(defaults.news_timeout),
            alpha_vantage_requests_per_minute: self
                .alpha_vantage_requests_per_minute
                .unwrap_or(defaults.alpha_vantage_requests_per_minute),
            news_page_size: self.news_page_size.unwrap_or(defaults.news_page_size),
            default_timeframe: self.default_timeframe.unwrap_or(defaults.default_timeframe),
        };

        config.validate()?;
        Ok(config)
    }
}

//! Error types for stock lookups

use thiserror::Error;

/// Provider name used in Alpha Vantage errors
pub const ALPHA_VANTAGE: &str = "Alpha Vantage";

/// Provider name used in NewsAPI errors
pub const NEWS_API: &str = "NewsAPI";

/// Stock assistant errors
#[derive(Debug, Error)]
pub enum StockError {
    /// No stage of ticker resolution matched the query
    #[error("Could not identify stock ticker from query: '{query}'")]
    TickerNotFound { query: String },

    /// Provider has no API key configured
    #[error("{provider} is unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    /// Provider (or the local request quota) refused the call
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Series is shorter than the timeframe needs
    #[error("Not enough trading days for {symbol}: need {required}, have {available}")]
    InsufficientData {
        symbol: String,
        required: usize,
        available: usize,
    },

    /// Timeframe keyword outside the supported alias sets
    #[error("Unsupported timeframe: {0}")]
    UnsupportedTimeframe(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Provider reported an error
    #[error("{provider} error: {message}")]
    ApiError { provider: String, message: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StockError {
    pub(crate) fn api(provider: &str, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn rate_limited(provider: &str) -> Self {
        Self::RateLimitExceeded {
            provider: provider.to_string(),
        }
    }

    pub(crate) fn unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from a rate limit
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to agent_core::Error
impl From<StockError> for agent_core::Error {
    fn from(err: StockError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

//! API clients for market-data and news providers

pub mod alpha_vantage;
pub mod news_api;

pub use alpha_vantage::AlphaVantageClient;
pub use news_api::NewsApiClient;

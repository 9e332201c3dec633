//! Stock insight assistant
//!
//! Answers free-text questions such as "How is Tesla doing today?" by
//! resolving the company to a ticker, fetching its price history from Alpha
//! Vantage and recent headlines from NewsAPI, and composing a short report.
//!
//! - [`TickerResolver`]: static company table with a symbol-search fallback
//! - [`AlphaVantageClient`]: quotes and OHLCV series, under a local quota
//! - [`PriceChangeCalculator`]: day/week/month change from daily closes
//! - [`NewsApiClient`]: recent articles, filtered and truncated
//! - [`StockAnalyst`]: trend classification, news relevance and report text
//! - [`tools`]: the five status-tagged tools for an agent runtime
//! - [`StockAssistant`]: an [`agent_core::Agent`] answering questions directly
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_core::{Agent, Context};
//! use agent_stock::{StockAssistant, StockConfig, StockToolkit};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(StockConfig::from_env()?);
//!     let toolkit = StockToolkit::new(config)?;
//!
//!     // Declare the tools to an LLM runtime...
//!     let registry = toolkit.tool_registry();
//!     println!("{} tools", registry.len());
//!
//!     // ...or answer a question directly
//!     let assistant = StockAssistant::new(toolkit);
//!     let answer = assistant
//!         .process("How is Tesla doing today?".to_string(), &mut Context::new())
//!         .await?;
//!     println!("{answer}");
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod assistant;
pub mod change;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod resolver;
pub mod toolkit;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{AnalysisReport, StockAnalyst, Trend};
pub use api::{AlphaVantageClient, NewsApiClient};
pub use assistant::StockAssistant;
pub use change::{PriceChange, PriceChangeCalculator, Timeframe};
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use http::{FetchRequest, FetchResponse, HttpFetch, ReqwestFetcher};
pub use resolver::TickerResolver;
pub use toolkit::StockToolkit;

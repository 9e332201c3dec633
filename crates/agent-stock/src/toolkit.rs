//! Shared clients and tool registration

use agent_tools::ToolRegistry;
use std::sync::Arc;

use crate::analysis::StockAnalyst;
use crate::api::{AlphaVantageClient, NewsApiClient};
use crate::change::PriceChangeCalculator;
use crate::config::StockConfig;
use crate::error::Result;
use crate::http::{HttpFetch, ReqwestFetcher};
use crate::resolver::TickerResolver;
use crate::tools::{
    IdentifyTickerTool, TickerAnalysisTool, TickerNewsTool, TickerPriceChangeTool,
    TickerPriceTool,
};

/// Provider clients and components built once from configuration
///
/// Cloning is cheap; clones share the transport and the Alpha Vantage quota.
#[derive(Clone)]
pub struct StockToolkit {
    config: Arc<StockConfig>,
    market: AlphaVantageClient,
    news: NewsApiClient,
    resolver: TickerResolver,
    calculator: PriceChangeCalculator,
    analyst: StockAnalyst,
}

impl StockToolkit {
    /// Build the toolkit over a real HTTP transport
    pub fn new(config: Arc<StockConfig>) -> Result<Self> {
        let fetcher = Arc::new(ReqwestFetcher::new()?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Build the toolkit over any transport
    pub fn with_fetcher(config: Arc<StockConfig>, fetcher: Arc<dyn HttpFetch>) -> Self {
        let market = AlphaVantageClient::new(Arc::clone(&fetcher), &config);
        let news = NewsApiClient::new(fetcher, &config);

        if !market.is_configured() {
            tracing::warn!("ALPHA_VANTAGE_API_KEY not set; price lookups will fail");
        }
        if !news.is_configured() {
            tracing::info!("NEWS_API_KEY not set; news will be empty");
        }

        Self {
            resolver: TickerResolver::new(market.clone()),
            calculator: PriceChangeCalculator::new(market.clone()),
            analyst: StockAnalyst::new(market.clone(), news.clone()),
            config,
            market,
            news,
        }
    }

    /// Register the five stock tools
    pub fn register_tools(&self, registry: &ToolRegistry) {
        let default_timeframe = self.config.default_timeframe.as_str();

        registry.register(Arc::new(IdentifyTickerTool::new(self.resolver.clone())));
        registry.register(Arc::new(TickerNewsTool::new(self.news.clone())));
        registry.register(Arc::new(TickerPriceTool::new(self.market.clone())));
        registry.register(Arc::new(TickerPriceChangeTool::new(
            self.calculator.clone(),
            default_timeframe,
        )));
        registry.register(Arc::new(TickerAnalysisTool::new(
            self.analyst.clone(),
            default_timeframe,
        )));

        tracing::debug!("Registered {} stock tools", registry.len());
    }

    /// Fresh registry holding the stock tools
    pub fn tool_registry(&self) -> ToolRegistry {
        let registry = ToolRegistry::new();
        self.register_tools(&registry);
        registry
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    pub fn resolver(&self) -> &TickerResolver {
        &self.resolver
    }

    pub fn analyst(&self) -> &StockAnalyst {
        &self.analyst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeFetcher, global_quote_json, test_config};
    use serde_json::json;

    fn toolkit(fetcher: FakeFetcher) -> StockToolkit {
        StockToolkit::with_fetcher(Arc::new(test_config()), Arc::new(fetcher))
    }

    #[test]
    fn test_registers_five_tools() {
        let registry = toolkit(FakeFetcher::new()).tool_registry();

        assert_eq!(
            registry.names(),
            vec![
                "identify_ticker",
                "ticker_analysis",
                "ticker_news",
                "ticker_price",
                "ticker_price_change",
            ]
        );

        for definition in registry.definitions() {
            assert!(!definition.description.is_empty());
            assert_eq!(definition.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_default_timeframe_reaches_schemas() {
        let config = StockConfig::builder().default_timeframe("1month").build().unwrap();
        let toolkit = StockToolkit::with_fetcher(Arc::new(config), Arc::new(FakeFetcher::new()));
        let registry = toolkit.tool_registry();

        let change = registry.get("ticker_price_change").unwrap();
        assert_eq!(change.input_schema()["properties"]["timeframe"]["default"], "1month");
    }

    #[tokio::test]
    async fn test_invoke_through_registry() {
        let registry = toolkit(
            FakeFetcher::new().with_function("GLOBAL_QUOTE", global_quote_json("MSFT", 420.0)),
        )
        .tool_registry();

        let result = registry
            .invoke("ticker_price", json!({ "ticker": "MSFT" }))
            .await
            .unwrap();
        assert_eq!(result["status"], "success");
        assert_eq!(result["current_price"], 420.0);

        let err = registry.invoke("ticker_forecast", json!({})).await.unwrap_err();
        assert!(matches!(err, agent_core::Error::ToolNotFound(_)));
    }
}

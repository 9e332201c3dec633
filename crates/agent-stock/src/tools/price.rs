//! Tool fetching the current price

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::ToolResponse;
use crate::api::AlphaVantageClient;
use crate::model::{Quote, QuoteSource};

/// Tool fetching the current quote for a ticker
pub struct TickerPriceTool {
    client: AlphaVantageClient,
}

#[derive(Debug, Deserialize)]
struct PriceParams {
    ticker: String,
}

#[derive(Debug, Serialize)]
struct PricePayload {
    ticker: String,
    current_price: f64,
    open: f64,
    high: f64,
    low: f64,
    volume: u64,
    previous_close: Option<f64>,
    latest_trading_day: Option<NaiveDate>,
    source: QuoteSource,
}

impl From<Quote> for PricePayload {
    fn from(quote: Quote) -> Self {
        Self {
            ticker: quote.symbol,
            current_price: quote.price,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            volume: quote.volume,
            previous_close: quote.previous_close,
            latest_trading_day: quote.latest_trading_day,
            source: quote.source,
        }
    }
}

impl TickerPriceTool {
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TickerPriceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: PriceParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::invalid_parameters(self.name(), e))?;

        let result = self
            .client
            .current_quote(&params.ticker)
            .await
            .map(PricePayload::from);

        Ok(ToolResponse::from_result(self.name(), result).into_value())
    }

    fn name(&self) -> &'static str {
        "ticker_price"
    }

    fn description(&self) -> &'static str {
        "Fetch the current stock price for a ticker, with open, high, low, volume \
         and the previous close."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol (e.g., 'NVDA')")
            }),
            &["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StockConfig;
    use crate::http::ReqwestFetcher;
    use crate::test_support::{FakeFetcher, daily_series_json, global_quote_json, test_config};
    use std::sync::Arc;

    fn tool(fetcher: FakeFetcher) -> TickerPriceTool {
        TickerPriceTool::new(AlphaVantageClient::new(Arc::new(fetcher), &test_config()))
    }

    #[tokio::test]
    async fn test_price_success() {
        let result = tool(FakeFetcher::new().with_function("GLOBAL_QUOTE", global_quote_json("NVDA", 875.5)))
            .execute(json!({ "ticker": "nvda" }))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        assert_eq!(result["ticker"], "NVDA");
        assert_eq!(result["current_price"], 875.5);
        assert_eq!(result["previous_close"], 870.0);
        assert_eq!(result["latest_trading_day"], "2024-03-28");
        assert_eq!(result["source"], "global_quote");
    }

    #[tokio::test]
    async fn test_price_from_daily_fallback() {
        let result = tool(
            FakeFetcher::new()
                .with_function("GLOBAL_QUOTE", json!({}))
                .with_function("TIME_SERIES_DAILY", daily_series_json("AMZN", &[180.0, 178.0])),
        )
        .execute(json!({ "ticker": "AMZN" }))
        .await
        .unwrap();

        assert_eq!(result["status"], "success");
        assert_eq!(result["current_price"], 180.0);
        assert_eq!(result["source"], "daily_fallback");
    }

    #[tokio::test]
    async fn test_rate_limit_is_error_status() {
        let result = tool(FakeFetcher::new().with_function(
            "GLOBAL_QUOTE",
            json!({ "Note": "Thank you for using Alpha Vantage!" }),
        ))
        .execute(json!({ "ticker": "TSLA" }))
        .await
        .unwrap();

        assert_eq!(result["status"], "error");
        assert_eq!(result["error_message"], "Rate limit exceeded for Alpha Vantage");
    }

    #[tokio::test]
    async fn test_unreachable_provider_keeps_key_out_of_error() {
        let config = StockConfig::builder()
            .alpha_vantage_api_key("SECRET-AV-KEY-123")
            .alpha_vantage_base_url("http://127.0.0.1:1/query")
            .build()
            .unwrap();
        let client = AlphaVantageClient::new(Arc::new(ReqwestFetcher::new().unwrap()), &config);

        let result = TickerPriceTool::new(client)
            .execute(json!({ "ticker": "TSLA" }))
            .await
            .unwrap();

        assert_eq!(result["status"], "error");
        let message = result["error_message"].as_str().unwrap();
        assert!(message.starts_with("Network error"));
        assert!(!message.contains("SECRET-AV-KEY-123"));
        assert!(!message.contains("apikey="));
    }
}

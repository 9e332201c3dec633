//! Tool fetching recent company news

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::ToolResponse;
use crate::api::NewsApiClient;
use crate::model::NewsItem;

/// Tool fetching recent news about a company
pub struct TickerNewsTool {
    client: NewsApiClient,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    ticker: String,
    company_name: String,
}

#[derive(Debug, Serialize)]
struct NewsPayload {
    ticker: String,
    news: Vec<NewsItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl TickerNewsTool {
    pub fn new(client: NewsApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TickerNewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: NewsParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::invalid_parameters(self.name(), e))?;

        let ticker = params.ticker.to_uppercase();
        let feed = self.client.company_news(&ticker, &params.company_name).await;
        let result = feed.map(|feed| NewsPayload {
            ticker,
            news: feed.articles,
            message: feed.message,
        });

        Ok(ToolResponse::from_result(self.name(), result).into_value())
    }

    fn name(&self) -> &'static str {
        "ticker_news"
    }

    fn description(&self) -> &'static str {
        "Fetch the most recent English news articles mentioning a company or its ticker. \
         An empty list with a message means no news was found."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol (e.g., 'TSLA')"),
                "company_name": schema::string("Company name (e.g., 'Tesla')")
            }),
            &["ticker", "company_name"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StockConfig;
    use crate::test_support::{FakeFetcher, news_json, test_config};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_news_success() {
        let fetcher = FakeFetcher::new().with_news(news_json(&[
            ("Palantir wins Army contract", "A new deal."),
            ("Palantir earnings preview", "What to expect."),
        ]));
        let tool = TickerNewsTool::new(NewsApiClient::new(Arc::new(fetcher), &test_config()));

        let result = tool
            .execute(json!({ "ticker": "pltr", "company_name": "Palantir" }))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        assert_eq!(result["ticker"], "PLTR");
        assert_eq!(result["news"].as_array().unwrap().len(), 2);
        assert_eq!(result["news"][0]["source"], "Reuters");
        assert!(result.get("message").is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_key_is_success() {
        let tool = TickerNewsTool::new(NewsApiClient::new(
            Arc::new(FakeFetcher::new()),
            &StockConfig::default(),
        ));

        let result = tool
            .execute(json!({ "ticker": "TSLA", "company_name": "Tesla" }))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        assert_eq!(result["news"], json!([]));
        assert!(result["message"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_provider_error_is_error_status() {
        let fetcher = FakeFetcher::new().with_news(json!({
            "status": "error",
            "code": "rateLimited",
            "message": "Too many requests"
        }));
        let tool = TickerNewsTool::new(NewsApiClient::new(Arc::new(fetcher), &test_config()));

        let result = tool
            .execute(json!({ "ticker": "TSLA", "company_name": "Tesla" }))
            .await
            .unwrap();

        assert_eq!(result["status"], "error");
        assert_eq!(result["error_message"], "Rate limit exceeded for NewsAPI");
    }

    #[tokio::test]
    async fn test_missing_company_name_is_invalid() {
        let tool = TickerNewsTool::new(NewsApiClient::new(
            Arc::new(FakeFetcher::new()),
            &test_config(),
        ));

        let err = tool.execute(json!({ "ticker": "TSLA" })).await.unwrap_err();
        assert!(matches!(err, agent_core::Error::InvalidParameters { .. }));
    }
}

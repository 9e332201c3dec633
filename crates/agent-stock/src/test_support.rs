//! Scripted transport and canned provider payloads for unit tests

use crate::config::StockConfig;
use crate::error::Result;
use crate::http::{FetchRequest, FetchResponse, HttpFetch};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// [`HttpFetch`] that answers Alpha Vantage requests by their `function`
/// parameter and everything else with the news payload
#[derive(Default)]
pub struct FakeFetcher {
    functions: HashMap<String, Value>,
    news: Option<Value>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(mut self, function: &str, body: Value) -> Self {
        self.functions.insert(function.to_string(), body);
        self
    }

    pub fn with_news(mut self, body: Value) -> Self {
        self.news = Some(body);
        self
    }

    /// Requests seen so far, in order
    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetch for FakeFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let body = match request.param("function") {
            Some(function) => self.functions.get(function).cloned().unwrap_or_else(|| {
                json!({ "Error Message": format!("no canned response for {function}") })
            }),
            None => self
                .news
                .clone()
                .unwrap_or_else(|| json!({ "status": "ok", "totalResults": 0, "articles": [] })),
        };

        self.calls.lock().unwrap().push(request);
        Ok(FetchResponse::ok_json(body.to_string()))
    }
}

/// Both keys set and a quota no test will exhaust
pub fn test_config() -> StockConfig {
    StockConfig::builder()
        .alpha_vantage_api_key("test-av-key")
        .news_api_key("test-news-key")
        .alpha_vantage_requests_per_minute(1_000)
        .build()
        .unwrap()
}

/// `GLOBAL_QUOTE` payload with a previous close of 870.0
pub fn global_quote_json(symbol: &str, price: f64) -> Value {
    json!({
        "Global Quote": {
            "01. symbol": symbol,
            "02. open": format!("{:.4}", price - 3.0),
            "03. high": format!("{:.4}", price + 5.0),
            "04. low": format!("{:.4}", price - 6.0),
            "05. price": format!("{price:.4}"),
            "06. volume": "42000000",
            "07. latest trading day": "2024-03-28",
            "08. previous close": "870.0000",
            "09. change": format!("{:.4}", price - 870.0),
            "10. change percent": "0.6322%"
        }
    })
}

/// `TIME_SERIES_DAILY` payload; `closes[0]` is the most recent trading day
pub fn daily_series_json(symbol: &str, closes: &[f64]) -> Value {
    let mut series = Map::new();
    for (i, close) in closes.iter().enumerate() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 28)
            .unwrap()
            .checked_sub_days(chrono::Days::new(i as u64))
            .unwrap();
        series.insert(
            date.format("%Y-%m-%d").to_string(),
            json!({
                "1. open": format!("{close:.4}"),
                "2. high": format!("{:.4}", close + 1.0),
                "3. low": format!("{:.4}", close - 1.0),
                "4. close": format!("{close:.4}"),
                "5. volume": "1000000"
            }),
        );
    }

    json!({
        "Meta Data": { "2. Symbol": symbol },
        "Time Series (Daily)": series
    })
}

/// NewsAPI `ok` payload with one Reuters article per `(title, description)`
pub fn news_json(articles: &[(&str, &str)]) -> Value {
    let articles: Vec<Value> = articles
        .iter()
        .enumerate()
        .map(|(i, (title, description))| {
            json!({
                "source": { "id": "reuters", "name": "Reuters" },
                "title": title,
                "description": description,
                "url": format!("https://example.test/news/{i}"),
                "publishedAt": "2024-03-28T14:05:00Z"
            })
        })
        .collect();

    json!({
        "status": "ok",
        "totalResults": articles.len(),
        "articles": articles
    })
}

/// `SYMBOL_SEARCH` payload listing `(symbol, name)` pairs in order
pub fn search_json(matches: &[(&str, &str)]) -> Value {
    let matches: Vec<Value> = matches
        .iter()
        .map(|(symbol, name)| {
            json!({
                "1. symbol": symbol,
                "2. name": name,
                "3. type": "Equity",
                "4. region": "United States",
                "9. matchScore": "0.9000"
            })
        })
        .collect();

    json!({ "bestMatches": matches })
}

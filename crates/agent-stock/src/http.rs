//! HTTP transport seam shared by the provider clients
//!
//! Provider clients build a [`FetchRequest`] and hand it to an [`HttpFetch`]
//! implementation. Production code uses [`ReqwestFetcher`]; tests substitute
//! scripted fetchers.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

use crate::error::Result;

/// Query parameters that must never reach a log line
const SECRET_PARAMS: &[&str] = &["apikey", "apiKey", "token"];

/// GET request with query parameters and an explicit timeout
#[derive(Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl FetchRequest {
    /// Create a request for `url` that fails after `timeout`
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            timeout,
        }
    }

    /// Append a query parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(key, value)| {
                if SECRET_PARAMS.contains(&key.as_str()) {
                    (key.as_str(), "***")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("FetchRequest")
            .field("url", &self.url)
            .field("query", &query)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// 200 response with a JSON body
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub const fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Transport used by provider clients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Execute one request; transport failures and timeouts are errors,
    /// non-2xx statuses are not
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

/// [`HttpFetch`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with its own connection pool
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("agent-stock/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        tracing::debug!("GET {:?}", request);

        // reqwest errors carry the full URL, query string and keys included
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params() {
        let request = FetchRequest::get("https://example.test/query", Duration::from_secs(5))
            .with_param("function", "GLOBAL_QUOTE")
            .with_param("symbol", "NVDA");

        assert_eq!(request.param("function"), Some("GLOBAL_QUOTE"));
        assert_eq!(request.param("symbol"), Some("NVDA"));
        assert_eq!(request.param("interval"), None);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let request = FetchRequest::get("https://example.test/query", Duration::from_secs(5))
            .with_param("symbol", "NVDA")
            .with_param("apikey", "super-secret")
            .with_param("apiKey", "also-secret");

        let rendered = format!("{request:?}");
        assert!(rendered.contains("NVDA"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
    }

    #[test]
    fn test_response_status() {
        assert!(FetchResponse::ok_json("{}").is_success());

        let limited = FetchResponse {
            status: 429,
            body: String::new(),
        };
        assert!(!limited.is_success());
        assert!(limited.is_rate_limited());
    }

    #[test]
    fn test_response_json() {
        let response = FetchResponse::ok_json(r#"{"status":"ok"}"#);
        assert_eq!(response.json().unwrap()["status"], "ok");

        let broken = FetchResponse::ok_json("<html>");
        assert!(broken.json().is_err());
    }

    #[tokio::test]
    async fn test_transport_error_omits_keys() {
        let fetcher = ReqwestFetcher::new().unwrap();
        let request = FetchRequest::get("http://127.0.0.1:1/query", Duration::from_secs(5))
            .with_param("symbol", "TSLA")
            .with_param("apikey", "SECRET-AV-KEY-123")
            .with_param("apiKey", "SECRET-NEWS-KEY-456");

        let err = fetcher.fetch(request).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Network error"));
        assert!(!message.contains("SECRET-AV-KEY-123"));
        assert!(!message.contains("SECRET-NEWS-KEY-456"));
        assert!(!message.contains("apikey="));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_reqwest_fetcher() {
        let fetcher = ReqwestFetcher::new().unwrap();
        let request = FetchRequest::get("https://www.alphavantage.co/query", Duration::from_secs(15))
            .with_param("function", "GLOBAL_QUOTE")
            .with_param("symbol", "IBM")
            .with_param("apikey", "demo");

        let response = fetcher.fetch(request).await.unwrap();
        assert!(response.is_success());
    }
}

//! NewsAPI client for company news

use crate::config::StockConfig;
use crate::error::{NEWS_API, Result, StockError};
use crate::http::{FetchRequest, HttpFetch};
use crate::model::{NewsFeed, NewsItem};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Descriptions longer than this are cut and marked with `...`
const DESCRIPTION_LIMIT: usize = 200;

/// NewsAPI puts this title on articles pulled after indexing
const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNewsResponse {
    status: String,
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<RawArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// NewsAPI `everything` client
#[derive(Clone)]
pub struct NewsApiClient {
    fetcher: Arc<dyn HttpFetch>,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    page_size: usize,
}

impl NewsApiClient {
    /// Create a client from configuration; a missing key is allowed
    pub fn new(fetcher: Arc<dyn HttpFetch>, config: &StockConfig) -> Self {
        Self {
            fetcher,
            api_key: config.news_api_key.clone(),
            base_url: config.news_api_base_url.clone(),
            timeout: config.news_timeout,
            page_size: config.news_page_size as usize,
        }
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Most recent articles mentioning the company or its ticker
    ///
    /// No key, or no results, is an empty feed rather than an error.
    pub async fn company_news(&self, ticker: &str, company_name: &str) -> Result<NewsFeed> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("NEWS_API_KEY not configured, skipping news for {}", ticker);
            return Ok(NewsFeed::empty(
                "News API key not configured; news is unavailable",
            ));
        };

        let request = FetchRequest::get(&self.base_url, self.timeout)
            .with_param("q", search_phrase(ticker, company_name))
            .with_param("apiKey", api_key)
            .with_param("sortBy", "publishedAt")
            .with_param("pageSize", self.page_size.to_string())
            .with_param("language", "en");

        let response = self.fetcher.fetch(request).await?;

        if response.is_rate_limited() {
            return Err(StockError::rate_limited(NEWS_API));
        }

        // error statuses still carry a JSON body with code and message
        let raw: RawNewsResponse = serde_json::from_str(&response.body).map_err(|e| {
            if response.is_success() {
                StockError::JsonError(e)
            } else {
                StockError::api(NEWS_API, format!("HTTP error: {}", response.status))
            }
        })?;

        if raw.status != "ok" {
            if raw.code.as_deref() == Some("rateLimited") {
                return Err(StockError::rate_limited(NEWS_API));
            }
            return Err(StockError::api(
                NEWS_API,
                raw.message
                    .or(raw.code)
                    .unwrap_or_else(|| format!("status '{}'", raw.status)),
            ));
        }

        let articles: Vec<NewsItem> = raw
            .articles
            .into_iter()
            .filter_map(into_news_item)
            .take(self.page_size)
            .collect();

        tracing::info!(
            "Fetched {} articles for {} ({} total results)",
            articles.len(),
            ticker,
            raw.total_results
        );

        if articles.is_empty() {
            return Ok(NewsFeed::empty("No recent news found"));
        }

        Ok(NewsFeed::new(articles))
    }
}

fn search_phrase(ticker: &str, company_name: &str) -> String {
    if company_name.eq_ignore_ascii_case(ticker) {
        format!("\"{ticker}\"")
    } else {
        format!("\"{company_name}\" OR \"{ticker}\"")
    }
}

fn into_news_item(raw: RawArticle) -> Option<NewsItem> {
    let title = raw.title.filter(|t| !t.trim().is_empty() && t != REMOVED_MARKER)?;
    let description = raw.description.filter(|d| !d.trim().is_empty())?;

    Some(NewsItem {
        title,
        description: truncate_description(&description),
        url: raw.url.unwrap_or_default(),
        published_at: raw.published_at.unwrap_or_default(),
        source: raw
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| "Unknown".to_string()),
    })
}

fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }
    let cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    format!("{cut}...")
}

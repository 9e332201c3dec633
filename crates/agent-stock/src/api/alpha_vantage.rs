//! Alpha Vantage API client

use crate::config::StockConfig;
use crate::error::{ALPHA_VANTAGE, Result, StockError};
use crate::http::{FetchRequest, HttpFetch};
use crate::model::{Bar, Granularity, Quote, QuoteSource, SymbolMatch, TimeSeries, parse_day};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
///
/// Cloning shares the transport and the request quota.
#[derive(Clone)]
pub struct AlphaVantageClient {
    fetcher: Arc<dyn HttpFetch>,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Deserialize)]
struct RawGlobalQuote {
    #[serde(rename = "02. open")]
    open: Option<String>,
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "1. open")]
    open: Option<String>,
    #[serde(rename = "2. high")]
    high: Option<String>,
    #[serde(rename = "3. low")]
    low: Option<String>,
    #[serde(rename = "4. close")]
    close: Option<String>,
    #[serde(rename = "5. volume")]
    volume: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSymbolMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "4. region")]
    region: Option<String>,
    #[serde(rename = "9. matchScore")]
    match_score: Option<String>,
}

impl AlphaVantageClient {
    /// Create a client from configuration
    ///
    /// A missing key is allowed; every call then fails with
    /// [`StockError::ProviderUnavailable`].
    pub fn new(fetcher: Arc<dyn HttpFetch>, config: &StockConfig) -> Self {
        let per_minute =
            NonZeroU32::new(config.alpha_vantage_requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self {
            fetcher,
            api_key: config.alpha_vantage_api_key.clone(),
            base_url: config.alpha_vantage_base_url.clone(),
            timeout: config.market_timeout,
            rate_limiter,
        }
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issue one query and screen the provider's error conventions
    async fn query(&self, function: &str, params: &[(&str, &str)]) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| StockError::ProviderUnavailable {
                provider: ALPHA_VANTAGE.to_string(),
                reason: "ALPHA_VANTAGE_API_KEY is not configured".to_string(),
            })?;

        if self.rate_limiter.check().is_err() {
            tracing::warn!("Local Alpha Vantage quota exhausted for {}", function);
            return Err(StockError::rate_limited(ALPHA_VANTAGE));
        }

        let mut request =
            FetchRequest::get(&self.base_url, self.timeout).with_param("function", function);
        for (name, value) in params {
            request = request.with_param(*name, *value);
        }
        let request = request.with_param("apikey", api_key);

        let response = self.fetcher.fetch(request).await?;

        if response.is_rate_limited() {
            return Err(StockError::rate_limited(ALPHA_VANTAGE));
        }

        if !response.is_success() {
            return Err(StockError::api(
                ALPHA_VANTAGE,
                format!("HTTP error: {}", response.status),
            ));
        }

        let data = response.json()?;
        check_provider_errors(&data)?;
        Ok(data)
    }

    /// Fetch the current quote
    ///
    /// Falls back to the latest daily bar when the real-time quote is missing
    /// or incomplete. Rate limits are never papered over by the fallback.
    pub async fn current_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = symbol.to_uppercase();

        if let Some(quote) = self.realtime_quote(&symbol).await? {
            return Ok(quote);
        }

        let series = self.daily_series(&symbol).await?;
        latest_bar_quote(&symbol, &series)
    }

    /// Fetch the current quote, falling back to the last bar of an already
    /// fetched daily series instead of requesting it again
    pub async fn current_quote_with_daily(&self, symbol: &str, daily: &TimeSeries) -> Result<Quote> {
        let symbol = symbol.to_uppercase();

        match self.realtime_quote(&symbol).await? {
            Some(quote) => Ok(quote),
            None => latest_bar_quote(&symbol, daily),
        }
    }

    /// `GLOBAL_QUOTE` with fallback screening; `Ok(None)` means use a daily bar
    async fn realtime_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        match self.global_quote(symbol).await {
            Ok(Some(quote)) => Ok(Some(quote)),
            Ok(None) => {
                tracing::debug!("Global quote for {} incomplete, using daily bar", symbol);
                Ok(None)
            }
            Err(err) if err.is_rate_limit() => Err(err),
            Err(err) => {
                tracing::warn!("Global quote for {} failed ({}), using daily bar", symbol, err);
                Ok(None)
            }
        }
    }

    /// `GLOBAL_QUOTE`; `Ok(None)` when the quote has no usable price
    async fn global_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        let data = self.query("GLOBAL_QUOTE", &[("symbol", symbol)]).await?;

        let Some(raw) = data.get("Global Quote") else {
            return Ok(None);
        };
        let raw: RawGlobalQuote = serde_json::from_value(raw.clone())?;

        let Some(price) = parse_number(raw.price.as_deref()) else {
            return Ok(None);
        };

        Ok(Some(Quote {
            symbol: symbol.to_string(),
            price,
            open: parse_number(raw.open.as_deref()).unwrap_or(price),
            high: parse_number(raw.high.as_deref()).unwrap_or(price),
            low: parse_number(raw.low.as_deref()).unwrap_or(price),
            volume: parse_volume(raw.volume.as_deref()),
            previous_close: parse_number(raw.previous_close.as_deref()),
            latest_trading_day: raw.latest_trading_day.as_deref().and_then(parse_day),
            source: QuoteSource::GlobalQuote,
        }))
    }

    /// Fetch a series, propagating any failure
    pub async fn series(&self, symbol: &str, granularity: Granularity) -> Result<TimeSeries> {
        let symbol = symbol.to_uppercase();

        let mut params = vec![("symbol", symbol.as_str()), ("outputsize", "compact")];
        if let Some(interval) = granularity.interval() {
            params.push(("interval", interval));
        }

        let data = self.query(granularity.function(), &params).await?;

        let raw = data.get(granularity.series_key()).ok_or_else(|| {
            StockError::unavailable(
                &symbol,
                format!("no '{}' in response", granularity.series_key()),
            )
        })?;
        let raw: BTreeMap<String, RawBar> = serde_json::from_value(raw.clone())?;

        let mut points = BTreeMap::new();
        for (date, bar) in raw {
            match parse_bar(&bar) {
                Some(bar) => {
                    points.insert(date, bar);
                }
                None => tracing::debug!("Skipping malformed {} bar for {}", date, symbol),
            }
        }

        Ok(TimeSeries {
            symbol,
            granularity,
            points,
        })
    }

    /// Fetch the daily series, propagating any failure
    pub async fn daily_series(&self, symbol: &str) -> Result<TimeSeries> {
        self.series(symbol, Granularity::Daily).await
    }

    /// Fetch a series; any failure is logged and reads as an empty series
    pub async fn historical_series(&self, symbol: &str, granularity: Granularity) -> TimeSeries {
        match self.series(symbol, granularity).await {
            Ok(series) => series,
            Err(err) => {
                tracing::warn!("Failed to fetch {:?} series for {}: {}", granularity, symbol, err);
                TimeSeries::empty(symbol.to_uppercase(), granularity)
            }
        }
    }

    /// Search for symbols matching free-text keywords
    pub async fn symbol_search(&self, keywords: &str) -> Result<Vec<SymbolMatch>> {
        let data = self
            .query("SYMBOL_SEARCH", &[("keywords", keywords)])
            .await?;

        let Some(matches) = data.get("bestMatches") else {
            return Ok(vec![]);
        };
        let matches: Vec<RawSymbolMatch> = serde_json::from_value(matches.clone())?;

        Ok(matches
            .into_iter()
            .map(|m| SymbolMatch {
                symbol: m.symbol,
                name: m.name,
                region: m.region,
                match_score: parse_number(m.match_score.as_deref()),
            })
            .collect())
    }
}

/// Alpha Vantage reports failures inside 200 responses
fn check_provider_errors(data: &Value) -> Result<()> {
    if let Some(error) = data.get("Error Message") {
        return Err(StockError::api(ALPHA_VANTAGE, value_text(error)));
    }

    if data.get("Note").is_some() {
        return Err(StockError::rate_limited(ALPHA_VANTAGE));
    }

    if let Some(info) = data.get("Information") {
        let text = value_text(info);
        if text.to_lowercase().contains("rate limit") {
            return Err(StockError::rate_limited(ALPHA_VANTAGE));
        }
        return Err(StockError::api(ALPHA_VANTAGE, text));
    }

    Ok(())
}

fn latest_bar_quote(symbol: &str, daily: &TimeSeries) -> Result<Quote> {
    Quote::from_latest_bar(daily)
        .ok_or_else(|| StockError::unavailable(symbol, "no quote or daily bar available"))
}

fn value_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim().trim_end_matches('%').parse().ok()
}

fn parse_volume(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

fn parse_bar(raw: &RawBar) -> Option<Bar> {
    let close = parse_number(raw.close.as_deref())?;
    Some(Bar {
        open: parse_number(raw.open.as_deref()).unwrap_or(close),
        high: parse_number(raw.high.as_deref()).unwrap_or(close),
        low: parse_number(raw.low.as_deref()).unwrap_or(close),
        close,
        volume: parse_volume(raw.volume.as_deref()),
    })
}

//! Data types shared across the stock components

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a [`Quote`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    /// Real-time `GLOBAL_QUOTE` endpoint
    GlobalQuote,
    /// Most recent bar of the daily series
    DailyFallback,
}

/// Current quote for one ticker at fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub previous_close: Option<f64>,
    pub latest_trading_day: Option<NaiveDate>,
    pub source: QuoteSource,
}

impl Quote {
    /// Derive a quote from the latest bar of a daily series
    ///
    /// The previous close comes from the bar before it, when there is one.
    pub fn from_latest_bar(series: &TimeSeries) -> Option<Self> {
        let mut recent = series.points.iter().rev();
        let (date, bar) = recent.next()?;
        let previous_close = recent.next().map(|(_, prior)| prior.close);

        Some(Self {
            symbol: series.symbol.clone(),
            price: bar.close,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            volume: bar.volume,
            previous_close,
            latest_trading_day: parse_day(date),
            source: QuoteSource::DailyFallback,
        })
    }
}

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Series granularity offered by the market-data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// 60-minute bars
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Alpha Vantage `function` parameter
    pub fn function(self) -> &'static str {
        match self {
            Self::Intraday => "TIME_SERIES_INTRADAY",
            Self::Daily => "TIME_SERIES_DAILY",
            Self::Weekly => "TIME_SERIES_WEEKLY",
            Self::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Key of the series object in the response
    pub fn series_key(self) -> &'static str {
        match self {
            Self::Intraday => "Time Series (60min)",
            Self::Daily => "Time Series (Daily)",
            Self::Weekly => "Weekly Time Series",
            Self::Monthly => "Monthly Time Series",
        }
    }

    /// `interval` parameter, only sent for intraday requests
    pub fn interval(self) -> Option<&'static str> {
        match self {
            Self::Intraday => Some("60min"),
            _ => None,
        }
    }
}

/// Date-ordered OHLCV series for one ticker
///
/// Keys are the provider's date (or timestamp) strings. ISO dates sort
/// chronologically, so the map iterates oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub symbol: String,
    pub granularity: Granularity,
    pub points: BTreeMap<String, Bar>,
}

impl TimeSeries {
    /// Empty series, used where a fetch failure reads as "no data"
    pub fn empty(symbol: impl Into<String>, granularity: Granularity) -> Self {
        Self {
            symbol: symbol.into(),
            granularity,
            points: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dates with their bars, most recent first
    pub fn newest_first(&self) -> Vec<(&str, &Bar)> {
        self.points
            .iter()
            .rev()
            .map(|(date, bar)| (date.as_str(), bar))
            .collect()
    }
}

/// One news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: String,
    pub source: String,
}

impl NewsItem {
    /// Calendar day of publication, when the timestamp parses
    pub fn published_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|ts| ts.date_naive())
    }
}

/// Result of a news lookup
///
/// An empty feed is a valid success; `message` explains why it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFeed {
    pub articles: Vec<NewsItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewsFeed {
    pub fn new(articles: Vec<NewsItem>) -> Self {
        Self {
            articles,
            message: None,
        }
    }

    /// Empty feed with an explanatory message
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// How a ticker was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedBy {
    /// A word of the query was a known ticker
    TickerSymbol,
    /// A known company name appeared in the query
    CompanyName,
    /// The provider's symbol search
    SymbolSearch,
}

/// Resolved company identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMatch {
    pub ticker: String,
    pub company_name: String,
    pub resolved_by: ResolvedBy,
}

/// One entry of a provider symbol search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    pub region: Option<String>,
    pub match_score: Option<f64>,
}

pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    // intraday keys carry a time after the date
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

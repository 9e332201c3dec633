//! Price change over a lookback window

use crate::api::AlphaVantageClient;
use crate::error::{Result, StockError};
use crate::model::TimeSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookback window for a price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Day,
    Week,
    Month,
}

impl Timeframe {
    /// Trading days the daily series must contain
    pub fn required_points(self) -> usize {
        match self {
            Self::Day => 2,
            Self::Week => 5,
            Self::Month => 20,
        }
    }

    /// Index (newest first) of the close to compare against
    ///
    /// Clamped to the last available index for short series.
    pub fn lookback_index(self, available: usize) -> usize {
        let last = available.saturating_sub(1);
        match self {
            Self::Day => 1,
            Self::Week => 4.min(last),
            Self::Month => 19.min(last),
        }
    }

    /// Canonical keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "1day",
            Self::Week => "1week",
            Self::Month => "1month",
        }
    }

    /// Phrase used in report text
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Day => "the past day",
            Self::Week => "the past week",
            Self::Month => "the past month",
        }
    }

    /// Guess a timeframe from the wording of a question
    pub fn detect(query: &str) -> Option<Self> {
        let query = query.to_lowercase();

        if query.contains("30 days") || query.contains("30-day") {
            return Some(Self::Month);
        }
        if query.contains("7 days") || query.contains("7-day") {
            return Some(Self::Week);
        }

        let words: Vec<&str> = query
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .collect();
        let mentions = |aliases: &[&str]| words.iter().any(|w| aliases.contains(w));

        if mentions(&["month", "monthly", "1m"]) {
            Some(Self::Month)
        } else if mentions(&["week", "weekly", "1w"]) {
            Some(Self::Week)
        } else if mentions(&["today", "day", "daily", "1d"]) {
            Some(Self::Day)
        } else {
            None
        }
    }
}

impl FromStr for Timeframe {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" | "1day" | "1d" => Ok(Self::Day),
            "week" | "1week" | "1w" | "7days" => Ok(Self::Week),
            "month" | "1month" | "1m" | "30days" => Ok(Self::Month),
            _ => Err(StockError::UnsupportedTimeframe(s.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change between the latest close and the lookback close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub ticker: String,
    pub timeframe: Timeframe,
    pub latest_close: f64,
    pub reference_close: f64,
    pub price_change: f64,
    pub percent_change: f64,
    /// Date of the reference close
    pub start_date: String,
    /// Date of the latest close
    pub end_date: String,
    /// Trading days between the two closes
    pub trading_days: usize,
}

/// Compute the change for `timeframe` from a daily series
pub fn compute_price_change(series: &TimeSeries, timeframe: Timeframe) -> Result<PriceChange> {
    if series.is_empty() {
        return Err(StockError::unavailable(
            &series.symbol,
            "no daily price history available",
        ));
    }

    let days = series.newest_first();
    let required = timeframe.required_points();
    if days.len() < required {
        return Err(StockError::InsufficientData {
            symbol: series.symbol.clone(),
            required,
            available: days.len(),
        });
    }

    let lookback = timeframe.lookback_index(days.len());
    let (end_date, latest) = days[0];
    let (start_date, reference) = days[lookback];

    if reference.close.abs() < f64::EPSILON {
        return Err(StockError::unavailable(
            &series.symbol,
            format!("reference close on {start_date} is zero"),
        ));
    }

    let price_change = latest.close - reference.close;
    let percent_change = price_change / reference.close * 100.0;

    Ok(PriceChange {
        ticker: series.symbol.clone(),
        timeframe,
        latest_close: latest.close,
        reference_close: reference.close,
        price_change,
        percent_change,
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        trading_days: lookback,
    })
}

/// Fetches daily history and computes price changes
#[derive(Clone)]
pub struct PriceChangeCalculator {
    market: AlphaVantageClient,
}

impl PriceChangeCalculator {
    pub fn new(market: AlphaVantageClient) -> Self {
        Self { market }
    }

    /// Price change for `ticker` over the timeframe named by `keyword`
    ///
    /// The keyword is validated before any request is made. Daily history is
    /// used whatever the timeframe.
    pub async fn price_change(&self, ticker: &str, keyword: &str) -> Result<PriceChange> {
        let (change, _) = self.price_change_with_history(ticker, keyword).await?;
        Ok(change)
    }

    /// Like [`price_change`](Self::price_change), also returning the daily
    /// series the change was computed from
    pub async fn price_change_with_history(
        &self,
        ticker: &str,
        keyword: &str,
    ) -> Result<(PriceChange, TimeSeries)> {
        let timeframe: Timeframe = keyword.parse()?;
        let series = self.market.daily_series(ticker).await?;
        let change = compute_price_change(&series, timeframe)?;

        tracing::info!(
            "{} {}: {:+.2} ({:+.2}%)",
            change.ticker,
            timeframe,
            change.price_change,
            change.percent_change
        );

        Ok((change, series))
    }
}

//! Analysis reports combining quote, price change and news

use crate::api::{AlphaVantageClient, NewsApiClient};
use crate::change::{PriceChange, PriceChangeCalculator, Timeframe};
use crate::error::Result;
use crate::model::{NewsFeed, NewsItem, Quote};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline words that make an article relevant to a price move
pub const NEWS_KEYWORDS: &[&str] = &[
    "earnings",
    "revenue",
    "profit",
    "loss",
    "beat",
    "miss",
    "guidance",
    "upgrade",
    "downgrade",
    "analyst",
    "target",
    "partnership",
    "deal",
    "acquisition",
    "merger",
    "lawsuit",
    "regulation",
    "fda",
    "approval",
];

/// Most articles quoted in a report
pub const MAX_RELEVANT_NEWS: usize = 3;

const NO_NEWS_NOTE: &str =
    "No significant news events were found that clearly explain this price movement.";

/// Qualitative bucket for a percent change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    SignificantIncrease,
    ModerateIncrease,
    SlightIncrease,
    MinimalChange,
    SlightDecrease,
    ModerateDecrease,
    SignificantDecrease,
}

impl Trend {
    /// Bucket a percent change; boundary values fall to the milder bucket
    pub fn classify(percent_change: f64) -> Self {
        if percent_change > 5.0 {
            Self::SignificantIncrease
        } else if percent_change > 2.0 {
            Self::ModerateIncrease
        } else if percent_change > 0.0 {
            Self::SlightIncrease
        } else if percent_change < -5.0 {
            Self::SignificantDecrease
        } else if percent_change < -2.0 {
            Self::ModerateDecrease
        } else if percent_change < 0.0 {
            Self::SlightDecrease
        } else {
            Self::MinimalChange
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SignificantIncrease => "significant increase",
            Self::ModerateIncrease => "moderate increase",
            Self::SlightIncrease => "slight increase",
            Self::MinimalChange => "minimal change",
            Self::SlightDecrease => "slight decrease",
            Self::ModerateDecrease => "moderate decrease",
            Self::SignificantDecrease => "significant decrease",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::SignificantIncrease | Self::ModerateIncrease | Self::SlightIncrease => "📈",
            Self::SignificantDecrease | Self::ModerateDecrease | Self::SlightDecrease => "📉",
            Self::MinimalChange => "➡️",
        }
    }
}

/// First few articles whose title mentions a [`NEWS_KEYWORDS`] word
pub fn relevant_news(articles: &[NewsItem]) -> Vec<NewsItem> {
    articles
        .iter()
        .filter(|item| {
            let title = item.title.to_lowercase();
            NEWS_KEYWORDS.iter().any(|keyword| title.contains(keyword))
        })
        .take(MAX_RELEVANT_NEWS)
        .cloned()
        .collect()
}

/// Finished analysis with the figures behind its text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub company_name: String,
    pub timeframe: Timeframe,
    pub current_price: f64,
    pub price_change: f64,
    pub percent_change: f64,
    pub trend: Trend,
    pub start_date: String,
    pub end_date: String,
    pub key_news: Vec<NewsItem>,
    /// Articles returned before the relevance filter
    pub news_count: usize,
    /// Why the news section is degraded, if it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_error: Option<String>,
    #[serde(rename = "analysis")]
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// Assemble a report from already fetched data
///
/// `news` is the outcome of the news lookup; a failure only changes the news
/// section.
pub fn compose_report(
    company_name: &str,
    quote: &Quote,
    change: &PriceChange,
    news: &Result<NewsFeed>,
) -> AnalysisReport {
    let trend = Trend::classify(change.percent_change);

    let (key_news, news_count, news_error) = match news {
        Ok(feed) => (relevant_news(&feed.articles), feed.articles.len(), None),
        Err(err) => (Vec::new(), 0, Some(err.to_string())),
    };

    let mut text = String::new();
    text.push_str(&format!(
        "{} {} ({}) Stock Analysis\n\n",
        trend.glyph(),
        company_name,
        change.ticker
    ));
    text.push_str(&format!("Current price: ${:.2}\n", quote.price));
    text.push_str(&format!(
        "Change over {}: {:+.2} ({:+.2}%)\n",
        change.timeframe.phrase(),
        change.price_change,
        change.percent_change
    ));
    text.push_str(&format!("Trend: {}\n", trend.label()));
    if !change.start_date.is_empty() && !change.end_date.is_empty() {
        text.push_str(&format!("Period: {} to {}\n", change.start_date, change.end_date));
    }
    text.push('\n');

    match (&news_error, key_news.is_empty()) {
        (Some(err), _) => {
            text.push_str(&format!("News is unavailable for this report ({err}).\n"));
        }
        (None, true) => {
            text.push_str(NO_NEWS_NOTE);
            text.push('\n');
        }
        (None, false) => {
            text.push_str("This movement may be related to the following recent news:\n");
            for (i, item) in key_news.iter().enumerate() {
                let published = item
                    .published_date()
                    .map_or_else(|| item.published_at.clone(), |d| d.to_string());
                text.push_str(&format!(
                    "{}. {} ({}, published {})\n",
                    i + 1,
                    item.title,
                    item.source,
                    published
                ));
            }
        }
    }
    text.push('\n');
    text.push_str(investment_context(change.percent_change));

    AnalysisReport {
        ticker: change.ticker.clone(),
        company_name: company_name.to_string(),
        timeframe: change.timeframe,
        current_price: quote.price,
        price_change: change.price_change,
        percent_change: change.percent_change,
        trend,
        start_date: change.start_date.clone(),
        end_date: change.end_date.clone(),
        key_news,
        news_count,
        news_error,
        text,
        generated_at: Utc::now(),
    }
}

fn investment_context(percent_change: f64) -> &'static str {
    let magnitude = percent_change.abs();
    if magnitude > 5.0 {
        "This is a significant move. Review the news and the company's fundamentals before acting on it."
    } else if magnitude > 2.0 {
        "This is a notable move worth monitoring for follow-through."
    } else {
        "The price has been relatively stable over this period."
    }
}

/// Runs the lookups behind an analysis and composes the report
#[derive(Clone)]
pub struct StockAnalyst {
    market: AlphaVantageClient,
    calculator: PriceChangeCalculator,
    news: NewsApiClient,
}

impl StockAnalyst {
    pub fn new(market: AlphaVantageClient, news: NewsApiClient) -> Self {
        Self {
            calculator: PriceChangeCalculator::new(market.clone()),
            market,
            news,
        }
    }

    /// Analyse `ticker` over the timeframe named by `timeframe`
    ///
    /// Price change and quote failures abort the analysis; a news failure is
    /// reported inside the report.
    pub async fn analyze(
        &self,
        ticker: &str,
        company_name: &str,
        timeframe: &str,
    ) -> Result<AnalysisReport> {
        let ticker = ticker.to_uppercase();

        let (change, daily) = self
            .calculator
            .price_change_with_history(&ticker, timeframe)
            .await?;
        let quote = self.market.current_quote_with_daily(&ticker, &daily).await?;

        let news = self.news.company_news(&ticker, company_name).await;
        if let Err(err) = &news {
            tracing::warn!("News lookup for {} failed, continuing without it: {}", ticker, err);
        }

        Ok(compose_report(company_name, &quote, &change, &news))
    }
}

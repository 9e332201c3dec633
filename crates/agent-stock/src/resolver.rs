//! Company and ticker resolution from free-text questions

use crate::api::AlphaVantageClient;
use crate::error::{Result, StockError};
use crate::model::{ResolvedBy, TickerMatch};
use std::collections::HashMap;

/// Companies recognised without a provider call, in lookup order
const KNOWN_COMPANIES: &[(&str, &str)] = &[
    ("tesla", "TSLA"),
    ("palantir", "PLTR"),
    ("nvidia", "NVDA"),
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("amazon", "AMZN"),
    ("google", "GOOGL"),
    ("meta", "META"),
    ("netflix", "NFLX"),
];

/// Words dropped from a question before it is sent to symbol search
const STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "change", "changed", "day", "days", "did", "do", "does",
    "doing", "down", "drop", "for", "going", "happening", "has", "have", "how", "in", "is",
    "last", "me", "month", "news", "of", "on", "past", "price", "recently", "rise", "share",
    "shares", "show", "stock", "stocks", "tell", "the", "this", "today", "up", "week", "what",
    "whats", "why", "with",
];

/// Words of the query kept for symbol search
const SEARCH_WORDS: usize = 3;

/// Resolves a question to a ticker and display name
///
/// A static table is consulted first; the provider's symbol search is only
/// used when it has no answer and a market-data key is configured.
#[derive(Clone)]
pub struct TickerResolver {
    by_name: Vec<(String, String)>,
    by_ticker: HashMap<String, String>,
    market: AlphaVantageClient,
}

impl TickerResolver {
    pub fn new(market: AlphaVantageClient) -> Self {
        let by_name: Vec<(String, String)> = KNOWN_COMPANIES
            .iter()
            .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
            .collect();
        let by_ticker = by_name
            .iter()
            .map(|(name, ticker)| (ticker.clone(), display_name(name)))
            .collect();

        Self {
            by_name,
            by_ticker,
            market,
        }
    }

    /// Resolve from the static table only
    pub fn resolve_static(&self, query: &str) -> Option<TickerMatch> {
        let lowered = query.to_lowercase();

        for word in lowered.split_whitespace() {
            let candidate = trim_word(word).to_uppercase();
            if let Some(name) = self.by_ticker.get(&candidate) {
                return Some(TickerMatch {
                    ticker: candidate,
                    company_name: name.clone(),
                    resolved_by: ResolvedBy::TickerSymbol,
                });
            }
        }

        self.by_name
            .iter()
            .find(|(name, _)| lowered.contains(name.as_str()))
            .map(|(name, ticker)| TickerMatch {
                ticker: ticker.clone(),
                company_name: display_name(name),
                resolved_by: ResolvedBy::CompanyName,
            })
    }

    /// Resolve a question, falling back to the provider's symbol search
    pub async fn resolve(&self, query: &str) -> Result<TickerMatch> {
        if let Some(found) = self.resolve_static(query) {
            tracing::debug!("Resolved '{}' to {} from the static table", query, found.ticker);
            return Ok(found);
        }

        let not_found = || StockError::TickerNotFound {
            query: query.to_string(),
        };

        if !self.market.is_configured() {
            return Err(not_found());
        }

        let keywords = search_keywords(query);
        if keywords.is_empty() {
            return Err(not_found());
        }

        let matches = self.market.symbol_search(&keywords).await?;
        let best = matches.into_iter().next().ok_or_else(not_found)?;

        tracing::info!("Resolved '{}' to {} via symbol search", query, best.symbol);
        Ok(TickerMatch {
            ticker: best.symbol,
            company_name: best.name,
            resolved_by: ResolvedBy::SymbolSearch,
        })
    }
}

/// Strip surrounding punctuation and a possessive suffix
fn trim_word(word: &str) -> &str {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric());
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("’s"))
        .unwrap_or(word)
}

/// Query words worth searching for, stop words removed
fn search_keywords(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .map(trim_word)
        .filter(|word| !word.is_empty() && !STOP_WORDS.contains(word))
        .take(SEARCH_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StockConfig;
    use crate::http::MockHttpFetch;
    use crate::test_support::{FakeFetcher, search_json, test_config};
    use std::sync::Arc;

    /// Resolver whose market client must never be called
    fn offline_resolver() -> TickerResolver {
        let mut mock = MockHttpFetch::new();
        mock.expect_fetch().never();
        TickerResolver::new(AlphaVantageClient::new(Arc::new(mock), &test_config()))
    }

    #[test]
    fn test_ticker_symbol_any_case() {
        let resolver = offline_resolver();
        for query in ["What about NVDA?", "what about nvda", "Nvda's earnings", "(NvDa)"] {
            let found = resolver.resolve_static(query).unwrap();
            assert_eq!(found.ticker, "NVDA", "{query}");
            assert_eq!(found.company_name, "Nvidia");
            assert_eq!(found.resolved_by, ResolvedBy::TickerSymbol);
        }
    }

    #[test]
    fn test_ticker_symbol_must_be_whole_word() {
        let resolver = offline_resolver();
        // "metal" contains "meta" as a name, but not META as a word
        let found = resolver.resolve_static("metal prices").unwrap();
        assert_eq!(found.resolved_by, ResolvedBy::CompanyName);
        assert!(resolver.resolve_static("tslax is not a ticker").is_none());
    }

    #[test]
    fn test_company_name_substring() {
        let resolver = offline_resolver();
        let found = resolver.resolve_static("How is Tesla doing today?").unwrap();
        assert_eq!(found.ticker, "TSLA");
        assert_eq!(found.company_name, "Tesla");
        assert_eq!(found.resolved_by, ResolvedBy::CompanyName);

        let found = resolver.resolve_static("microsoft's cloud business").unwrap();
        assert_eq!(found.ticker, "MSFT");
    }

    #[test]
    fn test_ticker_scan_precedes_name_scan() {
        let resolver = offline_resolver();
        let found = resolver.resolve_static("Is apple cheaper than AMZN?").unwrap();
        assert_eq!(found.ticker, "AMZN");
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let resolver = offline_resolver();
        let found = resolver.resolve_static("google versus tesla").unwrap();
        assert_eq!(found.ticker, "TSLA");
    }

    #[test]
    fn test_search_keywords() {
        assert_eq!(
            search_keywords("How is the Snowflake stock doing today?"),
            "snowflake"
        );
        assert_eq!(
            search_keywords("What's happening with Berkshire Hathaway Class B shares"),
            "berkshire hathaway class"
        );
        assert_eq!(search_keywords("how is the stock doing"), "");
    }

    #[tokio::test]
    async fn test_symbol_search_fallback() {
        let fetcher = Arc::new(FakeFetcher::new().with_function(
            "SYMBOL_SEARCH",
            search_json(&[("SNOW", "Snowflake Inc"), ("SNOW.DEX", "Snowflake Inc")]),
        ));
        let resolver =
            TickerResolver::new(AlphaVantageClient::new(fetcher.clone(), &test_config()));

        let found = resolver.resolve("How is Snowflake doing?").await.unwrap();
        assert_eq!(found.ticker, "SNOW");
        assert_eq!(found.company_name, "Snowflake Inc");
        assert_eq!(found.resolved_by, ResolvedBy::SymbolSearch);
        assert_eq!(fetcher.calls()[0].param("keywords"), Some("snowflake"));
    }

    #[tokio::test]
    async fn test_static_match_skips_search() {
        let resolver = offline_resolver();
        let found = resolver.resolve("netflix subscribers").await.unwrap();
        assert_eq!(found.ticker, "NFLX");
    }

    #[tokio::test]
    async fn test_no_search_without_key() {
        let mut mock = MockHttpFetch::new();
        mock.expect_fetch().never();
        let market = AlphaVantageClient::new(Arc::new(mock), &StockConfig::default());
        let resolver = TickerResolver::new(market);

        let err = resolver.resolve("How is Snowflake doing?").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not identify stock ticker from query: 'How is Snowflake doing?'"
        );
    }

    #[tokio::test]
    async fn test_empty_search_results() {
        let fetcher = Arc::new(FakeFetcher::new().with_function("SYMBOL_SEARCH", search_json(&[])));
        let resolver = TickerResolver::new(AlphaVantageClient::new(fetcher, &test_config()));

        let err = resolver.resolve("zzzz qqqq").await.unwrap_err();
        assert!(matches!(err, StockError::TickerNotFound { query } if query == "zzzz qqqq"));
    }

    #[tokio::test]
    async fn test_search_errors_propagate() {
        let fetcher = Arc::new(FakeFetcher::new().with_function(
            "SYMBOL_SEARCH",
            serde_json::json!({ "Note": "call frequency exceeded" }),
        ));
        let resolver = TickerResolver::new(AlphaVantageClient::new(fetcher, &test_config()));

        let err = resolver.resolve("Snowflake").await.unwrap_err();
        assert!(err.is_rate_limit());
    }
}

//! Question-answering agent over the stock toolkit

use agent_core::{Agent, Context, ResponseFormat, Result};
use async_trait::async_trait;

use crate::change::Timeframe;
use crate::toolkit::StockToolkit;

/// Context key under which the resolved [`TickerMatch`](crate::model::TickerMatch) is left
pub const RESOLVED_TICKER: &str = "resolved_ticker";

/// Agent answering "how is X doing" questions with a full analysis
///
/// Timeframe precedence: the context's `timeframe`, then a timeframe named in
/// the question, then the configured default.
pub struct StockAssistant {
    toolkit: StockToolkit,
}

impl StockAssistant {
    pub fn new(toolkit: StockToolkit) -> Self {
        Self { toolkit }
    }

    pub fn toolkit(&self) -> &StockToolkit {
        &self.toolkit
    }

    fn pick_timeframe(&self, query: &str, context: &Context) -> String {
        if let Some(timeframe) = context.timeframe() {
            return timeframe.to_string();
        }
        Timeframe::detect(query).map_or_else(
            || self.toolkit.config().default_timeframe.clone(),
            |timeframe| timeframe.as_str().to_string(),
        )
    }
}

#[async_trait]
impl Agent for StockAssistant {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let found = self.toolkit.resolver().resolve(&input).await?;
        context.insert_typed(RESOLVED_TICKER, &found)?;

        let timeframe = self.pick_timeframe(&input, context);
        tracing::info!(
            "Analysing {} ({}) over {}",
            found.company_name,
            found.ticker,
            timeframe
        );

        let report = self
            .toolkit
            .analyst()
            .analyze(&found.ticker, &found.company_name, &timeframe)
            .await?;

        match context.response_format() {
            ResponseFormat::Text => Ok(report.text),
            ResponseFormat::Json => serde_json::to_string_pretty(&report).map_err(|e| {
                agent_core::Error::ProcessingFailed(format!("Failed to render report: {e}"))
            }),
        }
    }

    fn name(&self) -> &'static str {
        "stock-assistant"
    }
}

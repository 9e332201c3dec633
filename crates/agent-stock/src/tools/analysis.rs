//! Tool producing a full analysis report

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ToolResponse;
use crate::analysis::StockAnalyst;

/// Tool explaining a ticker's recent move with price and news data
pub struct TickerAnalysisTool {
    analyst: StockAnalyst,
    default_timeframe: String,
}

#[derive(Debug, Deserialize)]
struct AnalysisParams {
    ticker: String,
    company_name: String,
    #[serde(default)]
    timeframe: Option<String>,
}

impl TickerAnalysisTool {
    pub fn new(analyst: StockAnalyst, default_timeframe: impl Into<String>) -> Self {
        Self {
            analyst,
            default_timeframe: default_timeframe.into(),
        }
    }
}

#[async_trait]
impl Tool for TickerAnalysisTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: AnalysisParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::invalid_parameters(self.name(), e))?;

        let timeframe = params.timeframe.as_deref().unwrap_or(&self.default_timeframe);
        let result = self
            .analyst
            .analyze(&params.ticker, &params.company_name, timeframe)
            .await;

        Ok(ToolResponse::from_result(self.name(), result).into_value())
    }

    fn name(&self) -> &'static str {
        "ticker_analysis"
    }

    fn description(&self) -> &'static str {
        "Summarise a ticker's price movement over a timeframe, classify the trend \
         and list recent news that may explain it."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol (e.g., 'TSLA')"),
                "company_name": schema::string("Company name (e.g., 'Tesla')"),
                "timeframe": schema::string_with_default(
                    "Lookback window: '1day', '1week' or '1month'",
                    &self.default_timeframe,
                )
            }),
            &["ticker", "company_name"],
        )
    }
}

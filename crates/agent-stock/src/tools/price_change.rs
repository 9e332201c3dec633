//! Tool computing the price change over a timeframe

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ToolResponse;
use crate::change::PriceChangeCalculator;

/// Tool computing how a ticker moved over a day, week or month
pub struct TickerPriceChangeTool {
    calculator: PriceChangeCalculator,
    default_timeframe: String,
}

#[derive(Debug, Deserialize)]
struct PriceChangeParams {
    ticker: String,
    #[serde(default)]
    timeframe: Option<String>,
}

impl TickerPriceChangeTool {
    pub fn new(calculator: PriceChangeCalculator, default_timeframe: impl Into<String>) -> Self {
        Self {
            calculator,
            default_timeframe: default_timeframe.into(),
        }
    }
}

#[async_trait]
impl Tool for TickerPriceChangeTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: PriceChangeParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::invalid_parameters(self.name(), e))?;

        let timeframe = params.timeframe.as_deref().unwrap_or(&self.default_timeframe);
        let result = self.calculator.price_change(&params.ticker, timeframe).await;

        Ok(ToolResponse::from_result(self.name(), result).into_value())
    }

    fn name(&self) -> &'static str {
        "ticker_price_change"
    }

    fn description(&self) -> &'static str {
        "Compute the absolute and percent change of a ticker's closing price \
         over the past day, week or month."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol (e.g., 'AAPL')"),
                "timeframe": schema::string_with_default(
                    "Lookback window: '1day', '1week' or '1month' (aliases such as 'today', '7days' and '30days' work too)",
                    &self.default_timeframe,
                )
            }),
            &["ticker"],
        )
    }
}

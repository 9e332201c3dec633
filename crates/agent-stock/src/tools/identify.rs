//! Tool resolving a question to a ticker

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ToolResponse;
use crate::resolver::TickerResolver;

/// Tool identifying the company a question is about
pub struct IdentifyTickerTool {
    resolver: TickerResolver,
}

#[derive(Debug, Deserialize)]
struct IdentifyParams {
    query: String,
}

impl IdentifyTickerTool {
    pub fn new(resolver: TickerResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Tool for IdentifyTickerTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: IdentifyParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::invalid_parameters(self.name(), e))?;

        let result = self.resolver.resolve(&params.query).await;
        Ok(ToolResponse::from_result(self.name(), result).into_value())
    }

    fn name(&self) -> &'static str {
        "identify_ticker"
    }

    fn description(&self) -> &'static str {
        "Identify the stock ticker and company name mentioned in a free-text question. \
         Call this first when the user names a company rather than a ticker."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "query": schema::string("The user's question, e.g. 'How is Tesla doing today?'")
            }),
            &["query"],
        )
    }
}

//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// An agent turns one free-text request into one free-text answer. Anything
/// the caller wants to steer (timeframe, output format) travels in the
/// [`Context`]; agents keep no state between calls.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseAgent;

    #[async_trait]
    impl Agent for UppercaseAgent {
        async fn process(&self, input: String, context: &mut Context) -> Result<String> {
            context.insert("last_input", serde_json::json!(input));
            Ok(input.to_uppercase())
        }

        fn name(&self) -> &'static str {
            "uppercase"
        }
    }

    #[tokio::test]
    async fn test_agent_process_updates_context() {
        let agent = UppercaseAgent;
        let mut context = Context::new();

        let output = agent.process("tsla".to_string(), &mut context).await.unwrap();
        assert_eq!(output, "TSLA");
        assert_eq!(context.get("last_input").unwrap(), "tsla");
        assert_eq!(agent.name(), "uppercase");
    }
}

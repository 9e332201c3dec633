//! Per-request context for agents
//!
//! A `Context` carries caller preferences into a single `Agent::process`
//! call. It is created per request and never shared between requests.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Requested lookback window (e.g., "1day", "week", "1month")
    pub const TIMEFRAME: &str = "timeframe";
    /// Response format preference ("text" or "json")
    pub const RESPONSE_FORMAT: &str = "response_format";
}

/// Output format an agent should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl ResponseFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use agent_core::Context;
/// use agent_core::context::ResponseFormat;
///
/// let ctx = Context::new()
///     .with_timeframe("1month")
///     .with_response_format(ResponseFormat::Json);
///
/// assert_eq!(ctx.timeframe(), Some("1month"));
/// assert_eq!(ctx.response_format(), ResponseFormat::Json);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested timeframe
    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.insert(keys::TIMEFRAME, serde_json::json!(timeframe.into()));
        self
    }

    /// Set the response format
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.insert(keys::RESPONSE_FORMAT, serde_json::json!(format.as_str()));
        self
    }

    /// Requested timeframe, if the caller supplied one
    pub fn timeframe(&self) -> Option<&str> {
        self.get(keys::TIMEFRAME).and_then(|v| v.as_str())
    }

    /// Response format; anything other than "json" renders as text
    pub fn response_format(&self) -> ResponseFormat {
        match self.get(keys::RESPONSE_FORMAT).and_then(|v| v.as_str()) {
            Some("json") => ResponseFormat::Json,
            _ => ResponseFormat::Text,
        }
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value, serialized to JSON
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value, deserialized from JSON
    pub fn get_typed<T: DeserializeOwned>(&self, key: &str) -> crate::Result<Option<T>> {
        self.data
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })
            })
            .transpose()
    }

    /// Remove a value from the context
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

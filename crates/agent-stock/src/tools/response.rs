//! Status-tagged tool results

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::StockError;

/// Tool result carrying an explicit `status` tag
///
/// Serializes as `{"status": "success", ...payload}` or
/// `{"status": "error", "error_message": "..."}`. Payloads must serialize to
/// JSON objects.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResponse<T> {
    Success(T),
    Error { error_message: String },
}

impl<T: Serialize> ToolResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error_message: message.into(),
        }
    }

    /// Map a domain result, logging failures
    pub fn from_result(tool: &str, result: Result<T, StockError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => {
                tracing::warn!("{} failed: {}", tool, err);
                Self::error(err.to_string())
            }
        }
    }

    /// Render as a JSON value
    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or_else(|e| {
            json!({
                "status": "error",
                "error_message": format!("Failed to serialize result: {e}"),
            })
        })
    }
}

//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent and tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent or tool processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParameters { tool: String, reason: String },

    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
}

impl Error {
    /// Build an [`Error::InvalidParameters`] for the named tool
    pub fn invalid_parameters(tool: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidParameters {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}

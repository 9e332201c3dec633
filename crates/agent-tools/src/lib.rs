//! Tool framework for the stock assistant
//!
//! Tools are independently invocable functions with a name, a description and
//! a JSON input schema. An external LLM runtime consumes them through
//! [`ToolRegistry::definitions`] and calls them through
//! [`ToolRegistry::invoke`]; nothing here depends on that runtime.

pub mod definition;
pub mod registry;
pub mod tool;

pub use definition::{ToolDefinition, schema};
pub use registry::ToolRegistry;
pub use tool::Tool;

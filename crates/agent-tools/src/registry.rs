//! Tool registry for managing available tools

use crate::{Tool, ToolDefinition};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry for managing tools
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        let name = tool.name().to_string();
        if tools.insert(name.clone(), tool).is_some() {
            tracing::warn!("Replaced previously registered tool: {}", name);
        } else {
            tracing::debug!("Registered tool: {}", name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// Invoke a tool by name
    pub async fn invoke(&self, name: &str, params: Value) -> agent_core::Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| agent_core::Error::ToolNotFound(name.to_string()))?;

        tracing::debug!("Invoking tool {} with {}", name, params);
        tool.execute(params).await
    }

    /// Definitions of all registered tools, sorted by name
    ///
    /// This is what gets declared to an LLM provider.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut definitions: Vec<_> = tools
            .values()
            .map(|tool| ToolDefinition::from_tool(tool.as_ref()))
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Names of all registered tools, sorted
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> agent_core::Result<Value> {
            Ok(json!({ "status": "success", "echo": params }))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echo the parameters back"
        }

        fn input_schema(&self) -> Value {
            schema::object(json!({ "text": schema::string("Text to echo") }), &["text"])
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(EchoTool { name: "echo" }));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));
        registry.register(Arc::new(EchoTool { name: "echo" }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_definitions_sorted() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "zeta" }));
        registry.register(Arc::new(EchoTool { name: "alpha" }));

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "alpha");
        assert_eq!(definitions[1].name, "zeta");
        assert_eq!(definitions[0].input_schema["required"][0], "text");
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_invoke() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));

        let output = tokio_test::block_on(registry.invoke("echo", json!({ "text": "hi" }))).unwrap();
        assert_eq!(output["status"], "success");
        assert_eq!(output["echo"]["text"], "hi");
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = tokio_test::block_on(registry.invoke("nope", json!({}))).unwrap_err();
        assert!(matches!(err, agent_core::Error::ToolNotFound(name) if name == "nope"));
    }
}

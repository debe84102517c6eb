//! Tool trait, call records, and the name-keyed registry.
//!
//! A tool is a local function the model can request by emitting a
//! `<function=…>` block in its output. The parser turns those blocks into
//! [`ToolCall`] records; the registry resolves the name and runs the
//! matching implementation.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A request to execute a tool, parsed out of model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the function to execute
    pub name: String,

    /// Arguments as a name → typed-value mapping.
    ///
    /// Always present; a call with no parameter blocks has an empty map.
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: serde_json::Map::new(),
        }
    }
}

/// A tool descriptor in the wire shape the chat template expects:
/// `{"type": "function", "function": {"name": …, "description": …, "parameters": …}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: ToolFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// The core Tool trait.
///
/// Each local function the model may call implements this trait and is
/// registered in the [`ToolRegistry`] before the run starts.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "get_current_local_time").
    fn name(&self) -> &str;

    /// A description of what this tool does (rendered into the prompt).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments, returning its textual result.
    async fn execute(
        &self,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<String, ToolError>;

    /// Convert this tool into the wire-shaped descriptor for the template.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            r#type: "function".into(),
            function: ToolFunction {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters_schema(),
            },
        }
    }
}

/// A registry of available tools.
///
/// The workflow driver uses this to:
/// 1. Get tool descriptors to hand to the prompt renderer
/// 2. Look up and execute tools when the model requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool descriptors (for the prompt renderer).
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Execute a tool call, returning the tool's textual result.
    ///
    /// An unregistered name fails with [`ToolError::UnknownFunction`]
    /// carrying the exact offending name.
    pub async fn execute(&self, call: &ToolCall) -> std::result::Result<String, ToolError> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| ToolError::UnknownFunction(call.name.clone()))?;
        tool.execute(&call.arguments).await
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }
        async fn execute(
            &self,
            arguments: &serde_json::Map<String, serde_json::Value>,
        ) -> std::result::Result<String, ToolError> {
            let text = arguments
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            Ok(text.to_string())
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn descriptor_wire_shape() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].r#type, "function");
        assert_eq!(descriptors[0].function.name, "echo");

        let json = serde_json::to_value(&descriptors[0]).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "echo");
        assert!(json["function"]["parameters"]["properties"]["text"].is_object());
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let mut call = ToolCall::new("echo");
        call.arguments
            .insert("text".into(), serde_json::json!("hello world"));
        let result = registry.execute(&call).await.unwrap();
        assert_eq!(result, "hello world");
    }

    #[tokio::test]
    async fn registry_execute_unknown_function() {
        let registry = ToolRegistry::new();
        let call = ToolCall::new("nonexistent");
        let err = registry.execute(&call).await.unwrap_err();
        match err {
            ToolError::UnknownFunction(name) => assert_eq!(name, "nonexistent"),
            other => panic!("expected UnknownFunction, got {other:?}"),
        }
    }
}

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ToolError, ToolResult};
use crate::identifiers::ToolName;
use crate::tool::{Tool, ToolDefinition};

/// Trait for looking up and dispatching tool calls.
///
/// The host platform queries a registry for discovery metadata and invokes
/// tools by name through it.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Get a tool by name.
    ///
    /// # Returns
    ///
    /// `Some(Arc<dyn Tool>)` if the tool exists, `None` otherwise
    fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>>;

    /// Discovery metadata for every registered tool, ordered by name.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Dispatch a call to the named tool.
    ///
    /// Looks up the tool, checks that every required parameter is present,
    /// then invokes it.
    ///
    /// # Errors
    ///
    /// `ToolError::NotFound` if no such tool is registered, or
    /// `ToolError::InvalidParameters` if the parameters fail the schema
    /// check or the tool's own parsing.
    async fn dispatch(&self, name: &str, params: Value) -> ToolResult<Value> {
        let tool = self.get_tool(name).ok_or_else(|| ToolError::not_found(name))?;
        tool.definition().check_required(&params)?;

        tracing::debug!(tool = %name, "Dispatching tool call");
        tool.call(params).await
    }
}

/// In-memory tool registry for local tool storage and dispatch.
///
/// Tools are stored in a map keyed by their validated name, so listing
/// order is stable.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use courier_core::{InMemoryToolRegistry, Tool, ToolDefinition, ToolName, ToolResult};
/// use serde_json::Value;
/// use std::sync::Arc;
///
/// struct EchoTool(ToolDefinition);
///
/// #[async_trait]
/// impl Tool for EchoTool {
///     fn definition(&self) -> &ToolDefinition { &self.0 }
///     async fn call(&self, params: Value) -> ToolResult<Value> { Ok(params) }
/// }
///
/// let echo = EchoTool(ToolDefinition::new(
///     ToolName::parse("echo").unwrap(),
///     "Echo parameters back",
///     "/echo",
/// ));
/// let registry = InMemoryToolRegistry::new().with_tool(Arc::new(echo));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryToolRegistry {
    tools: BTreeMap<ToolName, Arc<dyn Tool>>,
}

impl InMemoryToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool to the registry using the builder pattern.
    ///
    /// A tool registered under an existing name replaces the previous one.
    #[must_use]
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        let name = tool.definition().name.clone();
        self.tools.insert(name, tool);
        self
    }

    /// Try to add a tool to the registry using the builder pattern.
    ///
    /// # Errors
    ///
    /// `ToolError::DuplicateTool` if a tool with the same name is already
    /// registered.
    pub fn try_with_tool(mut self, tool: Arc<dyn Tool>) -> ToolResult<Self> {
        let name = tool.definition().name.clone();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool {
                name: name.to_string(),
            });
        }
        self.tools.insert(name, tool);
        Ok(self)
    }

    /// Get all tool names registered in this registry.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().map(|name| name.to_string()).collect()
    }

    /// Get the number of tools registered.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolRegistry for InMemoryToolRegistry {
    fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let name = ToolName::parse(name).ok()?;
        self.tools.get(&name).cloned()
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| tool.definition().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ParameterDefinition, ParameterType};
    use serde_json::json;

    struct UppercaseTool {
        definition: ToolDefinition,
    }

    impl UppercaseTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition::new(
                    ToolName::parse("uppercase").unwrap(),
                    "Uppercase text",
                    "/uppercase",
                )
                .with_parameter(ParameterDefinition::required(
                    "text",
                    ParameterType::String,
                    "Text to transform",
                )),
            }
        }
    }

    #[async_trait]
    impl Tool for UppercaseTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn call(&self, params: Value) -> ToolResult<Value> {
            let text = params["text"]
                .as_str()
                .ok_or_else(|| ToolError::invalid_parameters(self.name(), "text must be a string"))?;
            Ok(json!(text.to_uppercase()))
        }
    }

    struct ReverseTool {
        definition: ToolDefinition,
    }

    impl ReverseTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition::new(
                    ToolName::parse("reverse").unwrap(),
                    "Reverse text",
                    "/reverse",
                ),
            }
        }
    }

    #[async_trait]
    impl Tool for ReverseTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn call(&self, params: Value) -> ToolResult<Value> {
            let text = params["text"].as_str().unwrap_or_default();
            Ok(json!(text.chars().rev().collect::<String>()))
        }
    }

    fn registry() -> InMemoryToolRegistry {
        InMemoryToolRegistry::new()
            .with_tool(Arc::new(UppercaseTool::new()))
            .with_tool(Arc::new(ReverseTool::new()))
    }

    #[tokio::test]
    async fn registry_dispatches_to_correct_tool() {
        let registry = registry();

        let upper = registry
            .dispatch("uppercase", json!({"text": "courier"}))
            .await
            .unwrap();
        let reversed = registry
            .dispatch("reverse", json!({"text": "courier"}))
            .await
            .unwrap();

        assert_eq!(upper, json!("COURIER"));
        assert_eq!(reversed, json!("reiruoc"));
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_is_not_found() {
        let err = registry()
            .dispatch("nonexistent", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::not_found("nonexistent"));

        let err = registry().dispatch("bad name!", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }

    #[tokio::test]
    async fn dispatch_checks_required_parameters() {
        let err = registry()
            .dispatch("uppercase", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters { ref tool, .. } if tool == "uppercase"));
    }

    #[test]
    fn try_with_tool_rejects_duplicates() {
        let result = registry().try_with_tool(Arc::new(ReverseTool::new()));
        assert!(matches!(
            result,
            Err(ToolError::DuplicateTool { ref name }) if name == "reverse"
        ));
    }

    #[test]
    fn registry_lists_names_and_definitions_in_order() {
        let registry = registry();

        assert_eq!(registry.tool_names(), vec!["reverse", "uppercase"]);
        let endpoints: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|d| d.endpoint)
            .collect();
        assert_eq!(endpoints, vec!["/reverse", "/uppercase"]);
    }

    #[test]
    fn registry_len_and_is_empty() {
        let empty = InMemoryToolRegistry::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let registry = registry();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get_tool("uppercase").unwrap().name(), "uppercase");
        assert!(registry.get_tool("missing").is_none());
    }
}

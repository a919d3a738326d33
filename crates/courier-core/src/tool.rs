//! Tool trait and declarative schema types.
//!
//! A [`ToolDefinition`] is the metadata a host platform needs to present a
//! tool: its name, a description, the endpoint it is served on and the
//! parameters it accepts. The [`Tool`] trait pairs that metadata with an
//! async handler.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ToolError, ToolResult};
use crate::identifiers::ToolName;

/// Primitive or structured type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    List,
    Dictionary,
}

/// Schema entry for a single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub description: String,
    pub required: bool,
}

impl ParameterDefinition {
    /// A required parameter.
    pub fn required(
        name: impl Into<String>,
        parameter_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            description: description.into(),
            required: true,
        }
    }

    /// An optional parameter.
    pub fn optional(
        name: impl Into<String>,
        parameter_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, parameter_type, description)
        }
    }
}

/// HTTP verb the host uses to invoke a tool endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    #[default]
    Post,
}

/// Discovery metadata for a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: String,
    pub endpoint: String,
    #[serde(default)]
    pub http_method: HttpVerb,
    pub parameters: Vec<ParameterDefinition>,
}

impl ToolDefinition {
    /// Create a definition with no parameters, invoked via `POST endpoint`.
    pub fn new(name: ToolName, description: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
            endpoint: endpoint.into(),
            http_method: HttpVerb::Post,
            parameters: Vec::new(),
        }
    }

    /// Append a parameter to the schema.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check that `params` is an object carrying every required parameter.
    ///
    /// A parameter explicitly set to `null` counts as missing. Type checks
    /// are left to the tool's own typed deserialization.
    pub fn check_required(&self, params: &Value) -> ToolResult<()> {
        let Some(object) = params.as_object() else {
            return Err(ToolError::invalid_parameters(
                self.name.as_str(),
                "parameters must be a JSON object",
            ));
        };

        let missing: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .filter(|p| object.get(&p.name).is_none_or(Value::is_null))
            .map(|p| p.name.as_str())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::invalid_parameters(
                self.name.as_str(),
                format!("missing required parameter(s): {}", missing.join(", ")),
            ))
        }
    }
}

/// A named, independently invocable operation.
///
/// Tools receive their parameters as a JSON object and return a JSON value.
/// Operational failures (a refused connection, a malformed URL) belong in
/// the returned value; `Err` is reserved for parameters the tool cannot
/// interpret at all.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the discovery metadata for this tool.
    fn definition(&self) -> &ToolDefinition;

    /// Returns the unique name identifier for this tool.
    fn name(&self) -> &str {
        self.definition().name.as_str()
    }

    /// Execute the tool with the provided parameters.
    async fn call(&self, params: Value) -> ToolResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition() -> ToolDefinition {
        ToolDefinition::new(
            ToolName::parse("post_request").unwrap(),
            "Make a POST request",
            "/post-request",
        )
        .with_parameter(ParameterDefinition::required(
            "url",
            ParameterType::String,
            "The full URL",
        ))
        .with_parameter(ParameterDefinition::required(
            "body",
            ParameterType::Dictionary,
            "The data to send",
        ))
        .with_parameter(ParameterDefinition::optional(
            "bearerToken",
            ParameterType::String,
            "Optional bearer token",
        ))
    }

    #[test]
    fn check_required_accepts_complete_parameters() {
        let params = json!({"url": "https://example.com", "body": {"a": 1}});
        assert!(definition().check_required(&params).is_ok());
    }

    #[test]
    fn check_required_reports_missing_and_null() {
        let params = json!({"url": "https://example.com", "body": null});
        let err = definition().check_required(&params).unwrap_err();
        match err {
            ToolError::InvalidParameters { tool, message } => {
                assert_eq!(tool, "post_request");
                assert!(message.contains("body"));
                assert!(!message.contains("url"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn check_required_rejects_non_objects() {
        let err = definition().check_required(&json!("https://example.com"));
        assert!(matches!(err, Err(ToolError::InvalidParameters { .. })));
    }

    #[test]
    fn definition_serializes_for_discovery() {
        let value = serde_json::to_value(definition()).unwrap();
        assert_eq!(value["name"], "post_request");
        assert_eq!(value["endpoint"], "/post-request");
        assert_eq!(value["http_method"], "POST");
        assert_eq!(value["parameters"][1]["type"], "dictionary");
        assert_eq!(value["parameters"][2]["required"], false);
        assert!(definition().parameter("bearerToken").is_some());
    }
}

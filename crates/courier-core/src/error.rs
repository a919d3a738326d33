//! Tool lookup and invocation errors.
//!
//! These errors describe failures at the registry and invocation boundary:
//! an unknown tool, or parameters that do not satisfy the tool's schema.
//! Failures that happen while a tool runs are part of the tool's own
//! output and never surface here.

use crate::identifiers::InvalidToolName;

/// Errors that can occur while registering or dispatching tools.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Tool '{name}' not found in registry")]
    NotFound { name: String },

    /// The supplied parameters do not satisfy the tool's schema.
    #[error("Tool '{tool}' received invalid parameters: {message}")]
    InvalidParameters { tool: String, message: String },

    /// A tool name failed validation.
    #[error("Invalid tool name: {0}")]
    InvalidToolName(#[from] InvalidToolName),

    /// A tool with the same name is already registered.
    #[error("Tool '{name}' is already registered")]
    DuplicateTool { name: String },

    /// The tool's output could not be serialized.
    #[error("Failed to serialize output of tool '{tool}': {message}")]
    Serialization { tool: String, message: String },
}

impl ToolError {
    /// Create a NotFound error from a tool name.
    pub fn not_found(name: impl Into<String>) -> Self {
        ToolError::NotFound { name: name.into() }
    }

    /// Create an InvalidParameters error for a tool.
    pub fn invalid_parameters(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ToolError::InvalidParameters {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Get the tool name associated with this error, if available.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            ToolError::NotFound { name } | ToolError::DuplicateTool { name } => Some(name),
            ToolError::InvalidParameters { tool, .. } | ToolError::Serialization { tool, .. } => {
                Some(tool)
            }
            ToolError::InvalidToolName(_) => None,
        }
    }
}

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_tool() {
        let error = ToolError::not_found("rest_request");
        assert_eq!(error.tool_name(), Some("rest_request"));
        assert!(error.to_string().contains("rest_request"));
        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn invalid_parameters_carries_message() {
        let error = ToolError::invalid_parameters("get_request", "missing field `url`");
        assert_eq!(error.tool_name(), Some("get_request"));
        assert!(error.to_string().contains("missing field `url`"));
    }

    #[test]
    fn invalid_tool_name_converts() {
        let error: ToolError = InvalidToolName::Empty.into();
        assert_eq!(error.tool_name(), None);
        assert!(error.to_string().contains("cannot be empty"));
    }
}

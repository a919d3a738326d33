//! # Courier Core
//!
//! Core traits and types for exposing operations as named, schema-described
//! tools to a host agent platform.
//!
//! A tool is a `(name, parameter schema, handler)` triple. Tools are
//! registered into a [`ToolRegistry`], which the host queries for discovery
//! metadata and invokes by name.

/// Tool and registry error types.
pub mod error;
/// Validated tool identifiers.
pub mod identifiers;
/// Tool registry implementations.
pub mod registry;
/// Tool trait and declarative schema types.
pub mod tool;

pub use error::{ToolError, ToolResult};
pub use identifiers::{InvalidToolName, MAX_TOOL_NAME_LENGTH, ToolName};
pub use registry::{InMemoryToolRegistry, ToolRegistry};
pub use tool::{HttpVerb, ParameterDefinition, ParameterType, Tool, ToolDefinition};

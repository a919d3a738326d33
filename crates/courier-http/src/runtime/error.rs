//! Error responses for the HTTP surface
//!
//! Only registry-level failures become HTTP errors. A tool that ran and
//! reported a failed request still answers `200` with its own output.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use courier_core::ToolError;
use serde::{Deserialize, Serialize};

/// Structured error body: `{ "error", "code", "message" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind
    pub error: String,
    /// HTTP status code
    pub code: u16,
    /// Human-readable error message
    pub message: String,
}

/// Errors returned by runtime handlers.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The invocation body is not a JSON document.
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for RuntimeError {
    fn from(rejection: JsonRejection) -> Self {
        RuntimeError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl RuntimeError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RuntimeError::Tool(err) => match err {
                ToolError::NotFound { .. } => StatusCode::NOT_FOUND,
                ToolError::InvalidParameters { .. } | ToolError::InvalidToolName(_) => {
                    StatusCode::BAD_REQUEST
                }
                ToolError::DuplicateTool { .. } => StatusCode::CONFLICT,
                ToolError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            RuntimeError::InvalidBody { status, .. } => *status,
        }
    }

    /// Machine-readable error kind
    pub fn error_kind(&self) -> &'static str {
        match self {
            RuntimeError::Tool(err) => match err {
                ToolError::NotFound { .. } => "tool_not_found",
                ToolError::InvalidParameters { .. } => "invalid_parameters",
                ToolError::InvalidToolName(_) => "invalid_tool_name",
                ToolError::DuplicateTool { .. } => "duplicate_tool",
                ToolError::Serialization { .. } => "serialization_failed",
            },
            RuntimeError::InvalidBody { .. } => "invalid_body",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_kind().to_string(),
            code: self.status_code().as_u16(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for RuntimeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Tool invocation failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Tool invocation rejected");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

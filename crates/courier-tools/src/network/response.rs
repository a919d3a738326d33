//! Normalized request outcomes.
//!
//! Every call produces exactly one [`RequestOutcome`]: a [`ResponseResult`]
//! whenever the server answered (whatever the status), or an
//! [`ErrorResult`] when the URL was rejected up front or the transport
//! failed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::request::HeaderFields;

pub const INVALID_URL_FORMAT: &str = "Invalid URL format";
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// True iff `status` is in the 2xx range.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Response payload: parsed JSON, or the raw body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

impl ResponseData {
    /// Interpret a response body.
    ///
    /// JSON-labelled bodies are parsed; a body that fails to parse falls
    /// back to its raw text with a warning.
    pub fn from_body(is_json: bool, body: String) -> Self {
        if !is_json {
            return ResponseData::Text(body);
        }

        match serde_json::from_str(&body) {
            Ok(value) => ResponseData::Json(value),
            Err(e) => {
                tracing::warn!(error = %e, "Response labelled as JSON failed to parse, returning raw text");
                ResponseData::Text(body)
            }
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Json(_) => None,
            ResponseData::Text(text) => Some(text),
        }
    }
}

/// The server answered. `success` reflects the status code only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResult {
    pub success: bool,
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderFields,
    pub data: ResponseData,
}

impl ResponseResult {
    pub fn new(status: u16, status_text: impl Into<String>, headers: HeaderFields, data: ResponseData) -> Self {
        Self {
            success: is_success(status),
            status,
            status_text: status_text.into(),
            headers,
            data,
        }
    }
}

/// Category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Redirect,
    Builder,
    Other,
}

/// Structured diagnostic for a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportDiagnostic {
    pub kind: TransportErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TransportDiagnostic {
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_builder() {
            TransportErrorKind::Builder
        } else if error.is_redirect() {
            TransportErrorKind::Redirect
        } else if error.is_body() {
            TransportErrorKind::Body
        } else if error.is_decode() {
            TransportErrorKind::Decode
        } else if error.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };

        Self {
            kind,
            url: error.url().map(|u| u.to_string()),
            status: error.status().map(|s| s.as_u16()),
            source: root_cause(error),
        }
    }
}

fn root_cause(error: &(dyn std::error::Error + 'static)) -> Option<String> {
    let mut source = error.source()?;
    while let Some(next) = source.source() {
        source = next;
    }
    Some(source.to_string())
}

/// Details attached to an [`ErrorResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Message(String),
    Transport(TransportDiagnostic),
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetails::Message(message) => f.write_str(message),
            ErrorDetails::Transport(diagnostic) => {
                write!(f, "{:?} error", diagnostic.kind)?;
                if let Some(source) = &diagnostic.source {
                    write!(f, ": {source}")?;
                }
                Ok(())
            }
        }
    }
}

/// The call could not be made or did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub success: bool,
    pub error: String,
    pub details: ErrorDetails,
}

impl ErrorResult {
    /// An error result. `success` is always false.
    pub fn new(error: impl Into<String>, details: ErrorDetails) -> Self {
        let error = error.into();
        Self {
            success: false,
            error: if error.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                error
            },
            details,
        }
    }

    /// The URL failed pre-flight validation.
    pub fn invalid_url(parser_message: impl Into<String>) -> Self {
        Self::new(INVALID_URL_FORMAT, ErrorDetails::Message(parser_message.into()))
    }

    /// The transport failed before a response was fully read.
    pub fn transport(error: &reqwest::Error) -> Self {
        Self::new(
            error.to_string(),
            ErrorDetails::Transport(TransportDiagnostic::from_reqwest(error)),
        )
    }
}

/// Outcome of one request: a response or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestOutcome {
    Response(ResponseResult),
    Error(ErrorResult),
}

impl RequestOutcome {
    /// The `success` flag of the underlying result.
    pub fn is_success(&self) -> bool {
        match self {
            RequestOutcome::Response(response) => response.success,
            RequestOutcome::Error(_) => false,
        }
    }

    pub fn response(&self) -> Option<&ResponseResult> {
        match self {
            RequestOutcome::Response(response) => Some(response),
            RequestOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            RequestOutcome::Response(_) => None,
            RequestOutcome::Error(error) => Some(error),
        }
    }
}

impl From<ResponseResult> for RequestOutcome {
    fn from(response: ResponseResult) -> Self {
        RequestOutcome::Response(response)
    }
}

impl From<ErrorResult> for RequestOutcome {
    fn from(error: ErrorResult) -> Self {
        RequestOutcome::Error(error)
    }
}

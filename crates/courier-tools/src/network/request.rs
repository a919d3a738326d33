//! Request description and assembly.
//!
//! A [`RequestSpec`] is the declarative description of one outbound call.
//! [`prepare`] turns it into a [`PreparedRequest`] without touching the
//! network: it validates the URL, resolves headers (authentication and
//! content type) and serializes the body.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

use super::response::ErrorResult;

/// Header name/value pairs as supplied by a caller or reported by a server.
pub type HeaderFields = BTreeMap<String, String>;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The method name is not one of GET, POST, PUT, PATCH or DELETE.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method '{0}', expected one of GET, POST, PUT, PATCH, DELETE")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(UnsupportedMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = UnsupportedMethod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request body: pre-formatted text, or structured data sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    Structured(Value),
}

impl RequestBody {
    /// Interpret an arbitrary JSON parameter as a request body.
    ///
    /// Falsy values (`null`, `""`, `0`, `false`) mean "no body". Objects and
    /// arrays are structured; strings pass through as text; other numbers
    /// and `true` are sent as their JSON text.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(text) => Some(RequestBody::Text(text)),
            Value::Object(_) | Value::Array(_) => Some(RequestBody::Structured(value)),
            other => Some(RequestBody::Text(other.to_string())),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

/// Authentication to attach to the request.
///
/// Credentials are optional: a descriptor whose required fields are
/// missing or empty injects no `Authorization` header and is not an error.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthDescriptor {
    #[default]
    None,
    Bearer {
        token: Option<String>,
    },
    Basic {
        username: Option<String>,
        password: Option<String>,
    },
}

impl AuthDescriptor {
    pub fn bearer(token: impl Into<String>) -> Self {
        AuthDescriptor::Bearer {
            token: Some(token.into()),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthDescriptor::Basic {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Bearer auth if a non-empty token is given, no auth otherwise.
    pub fn from_bearer_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => AuthDescriptor::Bearer { token: Some(token) },
            _ => AuthDescriptor::None,
        }
    }

    /// Short label for logs. Never includes credentials.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthDescriptor::None => "none",
            AuthDescriptor::Bearer { .. } => "bearer",
            AuthDescriptor::Basic { .. } => "basic",
        }
    }

    /// The `Authorization` header value, if the credentials are complete.
    pub fn authorization(&self) -> Option<String> {
        match self {
            AuthDescriptor::None => None,
            AuthDescriptor::Bearer { token } => {
                let token = non_empty(token)?;
                Some(format!("Bearer {token}"))
            }
            AuthDescriptor::Basic { username, password } => {
                let username = non_empty(username)?;
                let password = non_empty(password)?;
                let credentials = STANDARD.encode(format!("{username}:{password}"));
                Some(format!("Basic {credentials}"))
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl fmt::Debug for AuthDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthDescriptor::None => f.write_str("None"),
            AuthDescriptor::Bearer { token } => f
                .debug_struct("Bearer")
                .field("token", &token.as_ref().map(|_| "[REDACTED]"))
                .finish(),
            AuthDescriptor::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &password.as_ref().map(|_| "[REDACTED]"))
                .finish(),
        }
    }
}

/// Declarative description of one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HeaderFields,
    pub body: Option<RequestBody>,
    pub auth: AuthDescriptor,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderFields::new(),
            body: None,
            auth: AuthDescriptor::None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderFields) -> Self {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Option<RequestBody>>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_auth(mut self, auth: AuthDescriptor) -> Self {
        self.auth = auth;
        self
    }
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderFields,
    pub body: Option<String>,
}

/// Validate and assemble a request.
///
/// # Errors
///
/// An `ErrorResult` with error `"Invalid URL format"` if the URL does not
/// parse as an absolute URL.
pub fn prepare(spec: &RequestSpec) -> Result<PreparedRequest, ErrorResult> {
    let url = Url::parse(&spec.url).map_err(|e| ErrorResult::invalid_url(e.to_string()))?;

    let mut headers = spec.headers.clone();
    if let Some(authorization) = spec.auth.authorization() {
        set_header(&mut headers, AUTHORIZATION, authorization);
    }

    let body = match &spec.body {
        None => None,
        Some(RequestBody::Text(text)) => Some(text.clone()),
        Some(RequestBody::Structured(value)) => {
            if !has_header(&headers, CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
            }
            Some(value.to_string())
        }
    };

    Ok(PreparedRequest {
        method: spec.method,
        url,
        headers,
        body,
    })
}

/// Case-insensitive header lookup.
pub fn header_value<'a>(headers: &'a HeaderFields, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

pub fn has_header(headers: &HeaderFields, name: &str) -> bool {
    header_value(headers, name).is_some()
}

/// Insert a header, replacing any existing entry whose name differs only in case.
pub fn set_header(headers: &mut HeaderFields, name: &str, value: String) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value);
}

//! # REST Request Tools
//!
//! Host-facing tools backed by a [`RequestExecutor`]:
//!
//! - `rest_request`: any method, custom headers, bearer or basic auth
//! - `get_request`: GET with optional bearer token
//! - `post_request`: POST with optional bearer token

use async_trait::async_trait;
use courier_core::{
    ParameterDefinition, ParameterType, Tool, ToolDefinition, ToolError, ToolName, ToolResult,
};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::executor::RequestExecutor;
use super::request::{AuthDescriptor, HeaderFields, HttpMethod, RequestBody, RequestSpec};
use super::response::RequestOutcome;

pub const REST_REQUEST: &str = "rest_request";
pub const GET_REQUEST: &str = "get_request";
pub const POST_REQUEST: &str = "post_request";

/// Authentication scheme selector for `rest_request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    Bearer,
    Basic,
    #[default]
    None,
}

impl AuthType {
    /// Interpret the free-form `authType` parameter. Only the exact values
    /// `"bearer"` and `"basic"` select a scheme; anything else means no auth.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("bearer") => AuthType::Bearer,
            Some("basic") => AuthType::Basic,
            _ => AuthType::None,
        }
    }
}

/// Header values may be any JSON scalar: strings are kept, numbers and
/// booleans are sent as their JSON text, `null` entries are dropped.
fn deserialize_headers<'de, D>(deserializer: D) -> Result<Option<HeaderFields>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(map) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let mut headers = HeaderFields::new();
    for (name, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::String(text) => text,
            Value::Bool(_) | Value::Number(_) => value.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(D::Error::custom(format!(
                    "header '{name}' must be a string, number or boolean"
                )));
            }
        };
        headers.insert(name, value);
    }
    Ok(Some(headers))
}

/// Parameters of `rest_request`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestRequestParams {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default, deserialize_with = "deserialize_headers")]
    pub headers: Option<HeaderFields>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub basic_username: Option<String>,
    #[serde(default)]
    pub basic_password: Option<String>,
}

impl RestRequestParams {
    /// Build the request description. Credentials that do not belong to the
    /// selected `authType` are ignored.
    pub fn into_spec(self) -> RequestSpec {
        let auth = match AuthType::from_param(self.auth_type.as_deref()) {
            AuthType::None => AuthDescriptor::None,
            AuthType::Bearer => AuthDescriptor::Bearer {
                token: self.bearer_token,
            },
            AuthType::Basic => AuthDescriptor::Basic {
                username: self.basic_username,
                password: self.basic_password,
            },
        };

        RequestSpec::new(self.method, self.url)
            .with_headers(self.headers.unwrap_or_default())
            .with_body(self.body.and_then(RequestBody::from_json))
            .with_auth(auth)
    }
}

/// Parameters of `get_request`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequestParams {
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_headers")]
    pub headers: Option<HeaderFields>,
    #[serde(default)]
    pub bearer_token: Option<String>,
}

/// Parameters of `post_request`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequestParams {
    pub url: String,
    #[serde(default)]
    pub body: Value,
    #[serde(default, deserialize_with = "deserialize_headers")]
    pub headers: Option<HeaderFields>,
    #[serde(default)]
    pub bearer_token: Option<String>,
}

fn parse_params<P: DeserializeOwned>(tool: &str, params: Value) -> ToolResult<P> {
    serde_json::from_value(params).map_err(|e| ToolError::invalid_parameters(tool, e.to_string()))
}

fn into_output(tool: &str, outcome: RequestOutcome) -> ToolResult<Value> {
    serde_json::to_value(outcome).map_err(|e| ToolError::Serialization {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

fn headers_parameter(description: &str) -> ParameterDefinition {
    ParameterDefinition::optional("headers", ParameterType::Dictionary, description)
}

/// Generic REST API request tool.
pub struct RestRequestTool {
    executor: RequestExecutor,
    definition: ToolDefinition,
}

impl RestRequestTool {
    pub fn new(executor: RequestExecutor) -> Self {
        let definition = ToolDefinition::new(
            ToolName::new_unchecked(REST_REQUEST),
            "Make HTTP REST API requests with various methods (GET, POST, PUT, PATCH, DELETE), custom headers, and authentication options",
            "/rest-request",
        )
        .with_parameter(ParameterDefinition::required(
            "url",
            ParameterType::String,
            "The full URL to make the request to",
        ))
        .with_parameter(ParameterDefinition::required(
            "method",
            ParameterType::String,
            "HTTP method to use (GET, POST, PUT, PATCH, DELETE)",
        ))
        .with_parameter(headers_parameter(
            "Additional headers to include in the request (key-value pairs)",
        ))
        .with_parameter(ParameterDefinition::optional(
            "body",
            ParameterType::Dictionary,
            "Request body for POST, PUT, PATCH requests. Can be a JSON object or string",
        ))
        .with_parameter(ParameterDefinition::optional(
            "authType",
            ParameterType::String,
            r#"Authentication type: "bearer", "basic", or "none""#,
        ))
        .with_parameter(ParameterDefinition::optional(
            "bearerToken",
            ParameterType::String,
            r#"Bearer token for authentication (when authType is "bearer")"#,
        ))
        .with_parameter(ParameterDefinition::optional(
            "basicUsername",
            ParameterType::String,
            r#"Username for basic authentication (when authType is "basic")"#,
        ))
        .with_parameter(ParameterDefinition::optional(
            "basicPassword",
            ParameterType::String,
            r#"Password for basic authentication (when authType is "basic")"#,
        ));

        Self {
            executor,
            definition,
        }
    }
}

#[async_trait]
impl Tool for RestRequestTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, params: Value) -> ToolResult<Value> {
        let params: RestRequestParams = parse_params(REST_REQUEST, params)?;
        let outcome = self.executor.execute(params.into_spec()).await;
        into_output(REST_REQUEST, outcome)
    }
}

/// Simple GET request tool.
pub struct GetRequestTool {
    executor: RequestExecutor,
    definition: ToolDefinition,
}

impl GetRequestTool {
    pub fn new(executor: RequestExecutor) -> Self {
        let definition = ToolDefinition::new(
            ToolName::new_unchecked(GET_REQUEST),
            "Make a simple GET request to retrieve data from an API",
            "/get-request",
        )
        .with_parameter(ParameterDefinition::required(
            "url",
            ParameterType::String,
            "The full URL to GET",
        ))
        .with_parameter(headers_parameter("Optional headers to include"))
        .with_parameter(ParameterDefinition::optional(
            "bearerToken",
            ParameterType::String,
            "Optional bearer token for authentication",
        ));

        Self {
            executor,
            definition,
        }
    }
}

#[async_trait]
impl Tool for GetRequestTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, params: Value) -> ToolResult<Value> {
        let params: GetRequestParams = parse_params(GET_REQUEST, params)?;
        let outcome = self
            .executor
            .simple_get(params.url, params.headers, params.bearer_token)
            .await;
        into_output(GET_REQUEST, outcome)
    }
}

/// Simple POST request tool.
pub struct PostRequestTool {
    executor: RequestExecutor,
    definition: ToolDefinition,
}

impl PostRequestTool {
    pub fn new(executor: RequestExecutor) -> Self {
        let definition = ToolDefinition::new(
            ToolName::new_unchecked(POST_REQUEST),
            "Make a POST request to send data to an API",
            "/post-request",
        )
        .with_parameter(ParameterDefinition::required(
            "url",
            ParameterType::String,
            "The full URL to POST to",
        ))
        .with_parameter(ParameterDefinition::required(
            "body",
            ParameterType::Dictionary,
            "The data to send in the request body",
        ))
        .with_parameter(headers_parameter("Optional headers to include"))
        .with_parameter(ParameterDefinition::optional(
            "bearerToken",
            ParameterType::String,
            "Optional bearer token for authentication",
        ));

        Self {
            executor,
            definition,
        }
    }
}

#[async_trait]
impl Tool for PostRequestTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, params: Value) -> ToolResult<Value> {
        let params: PostRequestParams = parse_params(POST_REQUEST, params)?;
        let outcome = self
            .executor
            .simple_post(
                params.url,
                RequestBody::from_json(params.body),
                params.headers,
                params.bearer_token,
            )
            .await;
        into_output(POST_REQUEST, outcome)
    }
}

/// The three REST tools sharing one executor.
pub fn standard_tools(executor: RequestExecutor) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(RestRequestTool::new(executor.clone())),
        Arc::new(GetRequestTool::new(executor.clone())),
        Arc::new(PostRequestTool::new(executor)),
    ]
}

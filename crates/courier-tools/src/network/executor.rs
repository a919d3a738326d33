//! # Request Executor
//!
//! Performs one HTTP call per invocation and normalizes the outcome. The
//! executor holds no per-call state; the inner `reqwest::Client` is a cheap,
//! cloneable handle.

use reqwest::Client;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{error, info};

use super::request::{
    AuthDescriptor, HeaderFields, HttpMethod, PreparedRequest, RequestBody, RequestSpec, prepare,
};
use super::response::{ErrorResult, RequestOutcome, ResponseData, ResponseResult};

/// Errors raised while constructing an executor.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Transport settings passed straight through to the HTTP client.
///
/// No timeout is applied unless one is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

/// Executes [`RequestSpec`]s against the network.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    config: ExecutorConfig,
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestExecutor {
    /// Executor with a default client and no timeouts.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            config: ExecutorConfig::default(),
        }
    }

    /// Executor with pass-through transport settings.
    ///
    /// # Errors
    ///
    /// `ExecutorError::ClientBuild` if the HTTP client cannot be created.
    pub fn with_config(config: ExecutorConfig) -> Result<Self, ExecutorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Perform the request described by `spec`.
    ///
    /// Never fails: a malformed URL or a transport failure becomes an
    /// `ErrorResult`, and any response the server sends, including
    /// non-2xx, becomes a `ResponseResult`.
    pub async fn execute(&self, spec: RequestSpec) -> RequestOutcome {
        info!(
            method = %spec.method,
            url = %spec.url,
            auth = spec.auth.kind(),
            header_count = spec.headers.len(),
            has_body = spec.body.is_some(),
            "REST request called"
        );

        let prepared = match prepare(&spec) {
            Ok(prepared) => prepared,
            Err(invalid) => {
                error!(url = %spec.url, details = %invalid.details, "Invalid URL provided");
                return invalid.into();
            }
        };

        match self.send(prepared).await {
            Ok(response) => {
                info!(status = response.status, "Request completed with status {}", response.status);
                response.into()
            }
            Err(e) => {
                error!(method = %spec.method, url = %spec.url, error = %e, "REST request failed");
                ErrorResult::transport(&e).into()
            }
        }
    }

    /// GET `url`, with bearer auth when a non-empty token is given.
    pub async fn simple_get(
        &self,
        url: impl Into<String>,
        headers: Option<HeaderFields>,
        bearer_token: Option<String>,
    ) -> RequestOutcome {
        let spec = RequestSpec::new(HttpMethod::Get, url)
            .with_headers(headers.unwrap_or_default())
            .with_auth(AuthDescriptor::from_bearer_token(bearer_token));
        self.execute(spec).await
    }

    /// POST `body` to `url`, with bearer auth when a non-empty token is given.
    pub async fn simple_post(
        &self,
        url: impl Into<String>,
        body: Option<RequestBody>,
        headers: Option<HeaderFields>,
        bearer_token: Option<String>,
    ) -> RequestOutcome {
        let spec = RequestSpec::new(HttpMethod::Post, url)
            .with_headers(headers.unwrap_or_default())
            .with_body(body)
            .with_auth(AuthDescriptor::from_bearer_token(bearer_token));
        self.execute(spec).await
    }

    async fn send(&self, prepared: PreparedRequest) -> Result<ResponseResult, reqwest::Error> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
        } = prepared;

        info!("Making {} request to {}", method, url);

        let mut request = self.client.request(method.into(), url);
        for (key, value) in &headers {
            request = request.header(key, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = collect_headers(response.headers());
        let is_json = headers
            .get("content-type")
            .is_some_and(|content_type| content_type.contains("application/json"));

        let body = response.text().await?;
        let data = ResponseData::from_body(is_json, body);

        Ok(ResponseResult::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            data,
        ))
    }
}

/// Flatten response headers into lower-cased names, joining repeated
/// values with `", "`. Values that are not valid UTF-8 are decoded lossily.
fn collect_headers(headers: &HeaderMap) -> HeaderFields {
    let mut fields = HeaderFields::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        fields
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, SET_COOKIE};

    #[test]
    fn collect_headers_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        headers.insert("x-request-id", HeaderValue::from_static("abc"));

        let fields = collect_headers(&headers);

        assert_eq!(fields.get("set-cookie").map(String::as_str), Some("a=1, b=2"));
        assert_eq!(fields.get("x-request-id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn with_config_keeps_pass_through_settings() {
        let config = ExecutorConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2));
        let executor = RequestExecutor::with_config(config.clone()).unwrap();
        assert_eq!(executor.config(), &config);
        assert_eq!(RequestExecutor::new().config(), &ExecutorConfig::default());
    }

    #[tokio::test]
    async fn invalid_url_never_reaches_the_network() {
        let outcome = RequestExecutor::new()
            .execute(RequestSpec::new(HttpMethod::Get, "not a url"))
            .await;

        let error = outcome.error().expect("error result");
        assert_eq!(error.error, "Invalid URL format");
        assert!(!outcome.is_success());
    }
}

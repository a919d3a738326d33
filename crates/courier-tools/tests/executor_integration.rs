//! Integration tests for the request executor against a mock HTTP server.

use courier_tools::{
    AuthDescriptor, ErrorDetails, ExecutorConfig, HttpMethod, RequestBody, RequestExecutor,
    RequestSpec, ResponseData, TransportErrorKind,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn not_found_json_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such item"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = RequestExecutor::new()
        .execute(RequestSpec::new(
            HttpMethod::Get,
            format!("{}/missing", server.uri()),
        ))
        .await;

    let response = outcome.response().expect("response result");
    assert!(!response.success);
    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
    assert_eq!(response.data, ResponseData::Json(json!({"error": "no such item"})));
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn invalid_json_body_degrades_to_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"truncated\": ", "application/json"))
        .mount(&server)
        .await;

    let outcome = RequestExecutor::new()
        .simple_get(server.uri(), None, None)
        .await;

    let response = outcome.response().expect("response result");
    assert!(response.success);
    assert_eq!(response.status, 200);
    assert_eq!(response.data, ResponseData::Text("{\"truncated\": ".to_string()));
}

#[tokio::test]
async fn non_json_body_is_returned_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"looks\": \"like json\"}"))
        .mount(&server)
        .await;

    let outcome = RequestExecutor::new()
        .simple_get(server.uri(), None, None)
        .await;

    assert_eq!(
        outcome.response().map(|r| r.data.clone()),
        Some(ResponseData::Text("{\"looks\": \"like json\"}".to_string()))
    );
}

#[tokio::test]
async fn post_structured_body_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "widget"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "name": "widget"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = RequestExecutor::new()
        .simple_post(
            format!("{}/items", server.uri()),
            Some(RequestBody::Structured(json!({"name": "widget"}))),
            None,
            None,
        )
        .await;

    let response = outcome.response().expect("response result");
    assert!(response.success);
    assert_eq!(response.status, 201);
    assert_eq!(response.status_text, "Created");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(requests[0].body, br#"{"name":"widget"}"#.to_vec());
}

#[tokio::test]
async fn bearer_and_basic_auth_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bearer"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/basic"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let executor = RequestExecutor::new();

    let bearer = executor
        .execute(
            RequestSpec::new(HttpMethod::Get, format!("{}/bearer", server.uri()))
                .with_header("Authorization", "Token stale")
                .with_auth(AuthDescriptor::bearer("abc123")),
        )
        .await;
    let basic = executor
        .execute(
            RequestSpec::new(HttpMethod::Delete, format!("{}/basic", server.uri()))
                .with_auth(AuthDescriptor::basic("user", "pass")),
        )
        .await;

    assert!(bearer.is_success());
    assert!(basic.is_success());
    assert_eq!(basic.response().map(|r| r.status), Some(204));
}

#[tokio::test]
async fn text_body_and_caller_content_type_are_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("content-type", "text/xml"))
        .and(body_string("<item/>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = RequestExecutor::new()
        .execute(
            RequestSpec::new(HttpMethod::Put, server.uri())
                .with_header("Content-Type", "text/xml")
                .with_body(RequestBody::from("<item/>")),
        )
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn simple_get_matches_generic_execute() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok"))
        .and(header("x-client", "courier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "me"})))
        .expect(2)
        .mount(&server)
        .await;

    let executor = RequestExecutor::new();
    let url = format!("{}/me", server.uri());
    let mut headers = courier_tools::HeaderFields::new();
    headers.insert("X-Client".to_string(), "courier".to_string());

    let simple = executor
        .simple_get(url.clone(), Some(headers.clone()), Some("tok".to_string()))
        .await;
    let generic = executor
        .execute(
            RequestSpec::new(HttpMethod::Get, url)
                .with_headers(headers)
                .with_auth(AuthDescriptor::bearer("tok")),
        )
        .await;

    let (simple, generic) = (simple.response().unwrap(), generic.response().unwrap());
    assert_eq!(simple.status, generic.status);
    assert_eq!(simple.data, generic.data);
}

#[tokio::test]
async fn connection_failure_is_an_error_result() {
    let outcome = RequestExecutor::new()
        .simple_get("http://127.0.0.1:1/", None, None)
        .await;

    let error = outcome.error().expect("error result");
    assert!(!error.success);
    assert!(!error.error.is_empty());
    assert!(matches!(error.details, ErrorDetails::Transport(_)));
}

#[tokio::test]
async fn configured_timeout_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let executor =
        RequestExecutor::with_config(ExecutorConfig::new().with_timeout(Duration::from_millis(100)))
            .expect("client builds");
    let outcome = executor.simple_get(server.uri(), None, None).await;

    match &outcome.error().expect("error result").details {
        ErrorDetails::Transport(diagnostic) => {
            assert_eq!(diagnostic.kind, TransportErrorKind::Timeout)
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

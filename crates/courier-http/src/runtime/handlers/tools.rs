//! Tool invocation handler

use axum::response::Json;
use courier_core::{ToolName, ToolRegistry};
use serde_json::Value;
use tracing::info;

use crate::runtime::{RuntimeError, ToolRuntime};

/// Unwrap the parameter object from an invocation body.
///
/// Hosts send either `{"parameters": {...}}` or the parameter object itself.
/// A body whose only key is an object-valued `parameters` is unwrapped;
/// anything else is passed through unchanged.
pub fn extract_parameters(body: Value) -> Value {
    match body {
        Value::Object(mut map)
            if map.len() == 1 && map.get("parameters").is_some_and(Value::is_object) =>
        {
            map.remove("parameters").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// POST <endpoint> - Invoke the tool bound to this endpoint
///
/// The tool's output, including failed outbound requests, is returned with
/// `200`. Registry errors become [`RuntimeError`] responses.
pub async fn invoke_tool<T: ToolRegistry + 'static>(
    runtime: ToolRuntime<T>,
    tool: ToolName,
    body: Value,
) -> Result<Json<Value>, RuntimeError> {
    info!(tool = %tool, "Tool invocation received");

    let output = runtime
        .registry()
        .dispatch(tool.as_str(), extract_parameters(body))
        .await?;

    Ok(Json(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_parameters_are_unwrapped() {
        let body = json!({"parameters": {"url": "https://api.example.com"}});
        assert_eq!(
            extract_parameters(body),
            json!({"url": "https://api.example.com"})
        );
    }

    #[test]
    fn bare_parameters_pass_through() {
        let body = json!({"url": "https://api.example.com", "bearerToken": "t"});
        assert_eq!(extract_parameters(body.clone()), body);
    }

    #[test]
    fn parameters_alongside_other_keys_are_not_unwrapped() {
        let body = json!({"parameters": {"a": 1}, "url": "https://api.example.com"});
        assert_eq!(extract_parameters(body.clone()), body);

        let scalar = json!({"parameters": "not an object"});
        assert_eq!(extract_parameters(scalar.clone()), scalar);
    }
}

//! Health check handler

use axum::{extract::State, response::Json};
use courier_core::ToolRegistry;
use serde_json::{Value, json};

use crate::runtime::ToolRuntime;

/// GET /health - Liveness with version info and registered tool names
pub async fn health_check<T: ToolRegistry + 'static>(
    State(runtime): State<ToolRuntime<T>>,
) -> Json<Value> {
    let tools: Vec<String> = runtime
        .registry()
        .definitions()
        .into_iter()
        .map(|definition| definition.name.to_string())
        .collect();

    Json(json!({
        "status": "healthy",
        "service": "courier-http",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": runtime.uptime_seconds(),
        "tools": tools,
    }))
}

//! Tool discovery handler

use axum::{extract::State, response::Json};
use courier_core::{ToolDefinition, ToolRegistry};
use serde::{Deserialize, Serialize};

use crate::runtime::ToolRuntime;

/// Body of `GET /discovery`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub functions: Vec<ToolDefinition>,
}

/// GET /discovery - Metadata for every registered tool
pub async fn discovery<T: ToolRegistry + 'static>(
    State(runtime): State<ToolRuntime<T>>,
) -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        functions: runtime.registry().definitions(),
    })
}

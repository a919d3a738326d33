//! HTTP router configuration
//!
//! This module provides router setup and route registration for the runtime.
//! Fixed routes are `/discovery` and `/health`; every registered tool adds a
//! `POST` route at its declared endpoint.

use axum::{
    Router,
    extract::{DefaultBodyLimit, Json, State, rejection::JsonRejection},
    routing::{get, post},
};
use courier_core::ToolRegistry;
use serde_json::Value;
use std::collections::HashSet;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, warn};

use crate::runtime::{
    RuntimeConfig, RuntimeError, ToolRuntime,
    handlers::{discovery, health_check, invoke_tool},
};

const DISCOVERY_PATH: &str = "/discovery";
const HEALTH_PATH: &str = "/health";

impl<T: ToolRegistry + 'static> ToolRuntime<T> {
    /// Create the Axum router with default configuration
    pub fn router(self) -> Router {
        self.router_with_config(&RuntimeConfig::default())
    }

    /// Create the Axum router with custom configuration
    ///
    /// Tools whose endpoint is not an absolute path, or collides with a
    /// route that is already bound, are skipped with a warning.
    pub fn router_with_config(self, config: &RuntimeConfig) -> Router {
        let mut routes: Router<ToolRuntime<T>> = Router::new()
            .route(DISCOVERY_PATH, get(discovery::<T>))
            .route(HEALTH_PATH, get(health_check::<T>));

        let mut bound: HashSet<String> =
            HashSet::from([DISCOVERY_PATH.to_string(), HEALTH_PATH.to_string()]);

        for definition in self.registry().definitions() {
            let endpoint = definition.endpoint;
            let tool = definition.name;

            if !endpoint.starts_with('/') {
                warn!(tool = %tool, endpoint = %endpoint, "Skipping tool with relative endpoint");
                continue;
            }
            if !bound.insert(endpoint.clone()) {
                warn!(tool = %tool, endpoint = %endpoint, "Skipping tool with duplicate endpoint");
                continue;
            }

            debug!(tool = %tool, endpoint = %endpoint, "Registering tool route");
            routes = routes.route(
                &endpoint,
                post(
                    move |State(runtime): State<ToolRuntime<T>>,
                          body: Result<Json<Value>, JsonRejection>| {
                        let tool = tool.clone();
                        async move {
                            let Json(body) = body.map_err(RuntimeError::from)?;
                            invoke_tool(runtime, tool, body).await
                        }
                    },
                ),
            );
        }

        let mut router = routes
            .with_state(self)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.max_body_size))
            .layer(TraceLayer::new_for_http());

        if config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }
}

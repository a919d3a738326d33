//! # Courier Tools
//!
//! HTTP request convenience tools for agent platforms. One generic
//! `rest_request` tool plus `get_request` and `post_request` adapters, all
//! backed by a single [`RequestExecutor`].
//!
//! Every call yields a uniform result: a [`ResponseResult`] whenever the
//! server answered (non-2xx included, with `success: false`), or an
//! [`ErrorResult`] when the URL is malformed or the transport fails.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use courier_tools::{RequestExecutor, standard_registry};
//! use courier_core::ToolRegistry;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = standard_registry(RequestExecutor::new());
//! let output = registry
//!     .dispatch("get_request", json!({"url": "https://api.example.com/items"}))
//!     .await?;
//! println!("{}", output["status"]);
//! # Ok(())
//! # }
//! ```

/// Request assembly, execution and REST tools.
pub mod network;

use courier_core::InMemoryToolRegistry;

pub use network::*;

/// A registry holding `rest_request`, `get_request` and `post_request`.
pub fn standard_registry(executor: RequestExecutor) -> InMemoryToolRegistry {
    standard_tools(executor)
        .into_iter()
        .fold(InMemoryToolRegistry::new(), |registry, tool| {
            registry.with_tool(tool)
        })
}

//! # Runtime Module
//!
//! [`ToolRuntime`] wraps a [`ToolRegistry`] and turns it into an axum
//! [`Router`](axum::Router). Routes for tools are derived from each tool's
//! definition, so registering a tool is all it takes to expose it.
//!
//! ```rust
//! use courier_http::{RuntimeConfig, ToolRuntime};
//! use courier_tools::{RequestExecutor, standard_registry};
//!
//! let runtime = ToolRuntime::new(standard_registry(RequestExecutor::new()));
//! let app = runtime.router_with_config(&RuntimeConfig::default());
//! # let _ = app;
//! ```

/// Environment-based runtime configuration.
pub mod config;
/// Error responses for the HTTP surface.
pub mod error;
/// HTTP request handlers organized by functionality.
pub mod handlers;
/// Router configuration and route registration.
pub mod router;
/// Graceful shutdown on SIGINT/SIGTERM.
pub mod shutdown;

pub use config::{ConfigError, LogFormat, RuntimeConfig, RuntimeConfigBuilder};
pub use error::RuntimeError;
pub use shutdown::shutdown_signal;

use courier_core::ToolRegistry;
use std::sync::Arc;
use std::time::Instant;

/// Shared state behind every route: the registry and the runtime start time.
pub struct ToolRuntime<T: ToolRegistry> {
    registry: Arc<T>,
    started_at: Instant,
}

impl<T: ToolRegistry> Clone for ToolRuntime<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            started_at: self.started_at,
        }
    }
}

impl<T: ToolRegistry> ToolRuntime<T> {
    pub fn new(registry: T) -> Self {
        Self {
            registry: Arc::new(registry),
            started_at: Instant::now(),
        }
    }

    pub fn registry(&self) -> &T {
        &self.registry
    }

    /// Seconds since the runtime was created.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

//! # Courier HTTP Runtime
//!
//! Serves a tool registry to an agent host over HTTP:
//!
//! - `GET /discovery` lists every registered tool with its parameter schema
//! - `POST <endpoint>` invokes the tool registered at that endpoint
//! - `GET /health` reports liveness and the registered tool names
//!
//! Configuration is read from `COURIER_*` environment variables, see
//! [`runtime::RuntimeConfigBuilder::from_env`].

pub mod runtime;

// Re-export main types for public API
pub use runtime::*;

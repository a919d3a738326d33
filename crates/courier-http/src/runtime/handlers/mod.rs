//! HTTP request handlers
//!
//! This module contains the HTTP endpoint handlers organized by functionality.

pub mod discovery;
pub mod health;
pub mod tools;

// Re-export handlers for convenience
pub use discovery::*;
pub use health::*;
pub use tools::*;

//! Core types for the Gemini MCP server.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for the executor and observability

mod config;
mod errors;

pub use config::{Config, ExecutorConfig, ObservabilityConfig};
pub use errors::{Error, Result};

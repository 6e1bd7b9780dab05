//! # Gemini MCP - Codebase Analysis Tool Server
//!
//! MCP server that exposes the Gemini CLI as a fixed catalog of
//! codebase-analysis tools:
//! - Tool registry with typed argument schemas and dispatch-time validation
//! - Request dispatcher assembling `@path` prompts and command vectors
//! - Supervised execution of the external `gemini` binary
//! - Prompt catalog returning meta-prompts for the calling agent
//! - Newline-delimited JSON-RPC transport over stdio
//!
//! ## Architecture
//!
//! The server follows a one-way pipeline; all registries are built once at
//! startup and never mutated:
//! ```text
//!   stdio JSON-RPC →  ┌────────────────────────────────┐
//!                     │          Dispatcher            │
//!                     │  ┌────────┐ ┌────────────────┐ │
//!                     │  │Catalog │ │Templates +     │ │
//!                     │  │(6 tools)│ │Path Annotator │ │
//!                     │  └────────┘ └────────────────┘ │
//!                     └──────────────┬─────────────────┘
//!                                    ▼
//!                     ┌────────────────────────────────┐
//!                     │   Executor (probe → spawn)     │──→ gemini CLI
//!                     └────────────────────────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod dispatch;
pub mod executor;
pub mod prompts;
pub mod server;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};

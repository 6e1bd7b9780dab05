//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the Gemini MCP server.
///
/// Execution-level failures (binary missing, nonzero exit, spawn errors) are
/// resolved into textual tool responses by the dispatcher and never surface
/// here; these variants cover the hard faults that propagate to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed argument values (map to JSON-RPC invalid params).
    #[error("validation error: {0}")]
    Validation(String),

    /// A required tool/prompt argument was absent from the call.
    #[error("missing required argument '{argument}' for '{tool}'")]
    MissingArgument { tool: String, argument: String },

    /// Catalog lookup failures (map to JSON-RPC method not found).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convert to a JSON-RPC 2.0 error code.
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::MissingArgument { .. } => -32602,
            Error::NotFound(_) => -32601,
            Error::Internal(_) | Error::Serialization(_) | Error::Io(_) => -32603,
        }
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_argument(tool: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            tool: tool.into(),
            argument: argument.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_names_tool_and_field() {
        let err = Error::missing_argument("gemini_analyze_files", "prompt");
        assert_eq!(
            err.to_string(),
            "missing required argument 'prompt' for 'gemini_analyze_files'"
        );
        assert_eq!(err.json_rpc_code(), -32602);
    }

    #[test]
    fn error_codes_map_to_json_rpc() {
        assert_eq!(Error::validation("bad").json_rpc_code(), -32602);
        assert_eq!(Error::not_found("nope").json_rpc_code(), -32601);
        assert_eq!(Error::internal("boom").json_rpc_code(), -32603);
    }
}

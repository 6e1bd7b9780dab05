//! Configuration structures.
//!
//! Configuration is assembled from CLI flags and environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// External-command execution configuration.
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// External-command execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Name of the external analysis binary, resolved on `$PATH`.
    pub binary: String,

    /// Default working directory for spawned commands. Per-call
    /// `working_directory` arguments take precedence; `None` falls back to
    /// the server's current directory.
    pub working_directory: Option<PathBuf>,

    /// Upper bound on a single command's runtime. `None` waits indefinitely,
    /// matching the gemini CLI's own behavior of running to completion.
    #[serde(default, with = "humantime_serde")]
    pub command_timeout: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            binary: "gemini".to_string(),
            working_directory: None,
            command_timeout: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_executor_targets_gemini() {
        let config = ExecutorConfig::default();
        assert_eq!(config.binary, "gemini");
        assert!(config.working_directory.is_none());
        assert!(config.command_timeout.is_none());
    }

    #[test]
    fn command_timeout_roundtrips_humantime() {
        let config = ExecutorConfig {
            command_timeout: Some(Duration::from_secs(90)),
            ..ExecutorConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("1m 30s"));
        let back: ExecutorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.command_timeout, Some(Duration::from_secs(90)));
    }
}

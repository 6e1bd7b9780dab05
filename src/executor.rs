//! External-process execution — availability probe, spawn, captured output.
//!
//! The executor never lets a process-level failure escape as an error: probe
//! misses, spawn exceptions, and timeouts are all folded into a synthetic
//! [`ExecutionResult`] with exit code 1, and the dispatcher renders them as
//! text for the caller.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::types::ExecutorConfig;

/// Fixed message returned when the availability probe fails.
pub const BINARY_NOT_FOUND: &str = "Gemini CLI not found. Please install gemini CLI first.";

/// Captured outcome of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecutionResult {
    /// Synthetic failure result (probe miss, spawn error, timeout).
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: 1,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Seam between the dispatcher and the operating system. Production code uses
/// [`GeminiExecutor`]; tests substitute a recording spy.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` (program + arguments) with an optional working
    /// directory override, waiting for completion.
    async fn run(&self, command: &[String], cwd: Option<&Path>) -> ExecutionResult;
}

/// Two-phase runner for the external analysis binary: probe the search path
/// for the program, then spawn the real command.
#[derive(Debug, Clone)]
pub struct GeminiExecutor {
    config: ExecutorConfig,
}

impl GeminiExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Resolve the working directory for a spawn: per-call override first,
    /// then the configured default, then the server's current directory.
    fn resolve_cwd(&self, cwd: Option<&Path>) -> Option<PathBuf> {
        cwd.map(Path::to_path_buf)
            .or_else(|| self.config.working_directory.clone())
    }

    /// Phase 1: check that `program` resolves on the search path.
    async fn probe(&self, program: &str) -> bool {
        match Command::new("which")
            .arg(program)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!("availability probe failed to spawn: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl CommandRunner for GeminiExecutor {
    async fn run(&self, command: &[String], cwd: Option<&Path>) -> ExecutionResult {
        let Some((program, args)) = command.split_first() else {
            return ExecutionResult::failure("empty command");
        };

        if !self.probe(program).await {
            return ExecutionResult::failure(BINARY_NOT_FOUND);
        }

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the in-flight future (timeout expiry) must not leak
            // the child.
            .kill_on_drop(true);
        if let Some(dir) = self.resolve_cwd(cwd) {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %program, args = ?args, "spawning analysis command");

        let output = match self.config.command_timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    tracing::warn!(program = %program, "command timed out after {:?}", limit);
                    return ExecutionResult::failure(format!(
                        "Error running gemini command: timed out after {:?}",
                        limit
                    ));
                }
            },
            None => cmd.output().await,
        };

        match output {
            Ok(output) => ExecutionResult {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code().unwrap_or(1),
            },
            Err(e) => ExecutionResult::failure(format!("Error running gemini command: {}", e)),
        }
    }
}

//! Gemini MCP server - main entry point.
//!
//! Wires the dispatch engine to the stdio transport: CLI flags build the
//! configuration, the registries are constructed once, and the server runs
//! until stdin closes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;

use gemini_mcp::dispatch::Dispatcher;
use gemini_mcp::executor::GeminiExecutor;
use gemini_mcp::prompts::PromptCatalog;
use gemini_mcp::server::McpServer;
use gemini_mcp::types::{Config, ExecutorConfig, ObservabilityConfig};

#[derive(Parser, Debug)]
#[command(name = "gemini-mcp", version, about = "MCP server exposing Gemini CLI codebase-analysis tools")]
struct Args {
    /// External analysis binary, resolved on $PATH.
    #[arg(long, default_value = "gemini", env = "GEMINI_MCP_BINARY")]
    binary: String,

    /// Default working directory for spawned commands.
    #[arg(long, env = "GEMINI_MCP_WORKING_DIRECTORY")]
    working_directory: Option<PathBuf>,

    /// Bound on a single command's runtime, in seconds (unbounded if unset).
    #[arg(long, env = "GEMINI_MCP_COMMAND_TIMEOUT_SECS")]
    command_timeout_secs: Option<u64>,

    /// Tracing log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "GEMINI_MCP_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, env = "GEMINI_MCP_JSON_LOGS")]
    json_logs: bool,
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            executor: ExecutorConfig {
                binary: self.binary,
                working_directory: self.working_directory,
                command_timeout: self.command_timeout_secs.map(Duration::from_secs),
            },
            observability: ObservabilityConfig {
                log_level: self.log_level,
                json_logs: self.json_logs,
            },
        }
    }
}

#[tokio::main]
async fn main() -> gemini_mcp::Result<()> {
    let config = Args::parse().into_config();

    gemini_mcp::observability::init_tracing(&config.observability);
    tracing::info!(
        binary = %config.executor.binary,
        timeout = ?config.executor.command_timeout,
        "starting gemini-mcp"
    );

    let runner = Arc::new(GeminiExecutor::new(config.executor.clone()));
    let dispatcher = Dispatcher::new(config.executor.binary.clone(), runner);
    let server = McpServer::new(dispatcher, PromptCatalog::builtin());

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    server.serve(stdin, stdout).await
}

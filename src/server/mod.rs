//! MCP stdio server — newline-delimited JSON-RPC 2.0 routing.
//!
//! The hosting shell around the dispatch engine: reads requests from stdin,
//! routes `tools/*` to the [`Dispatcher`] and `prompts/*` to the
//! [`PromptCatalog`], and writes responses to stdout. Diagnostics never touch
//! stdout; they go to tracing (stderr).
//!
//! Requests are handled one at a time in arrival order — the engine holds no
//! mutable state, so the sequential loop is the only scheduling there is.

pub mod codec;

use std::collections::HashMap;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::dispatch::Dispatcher;
use crate::prompts::PromptCatalog;
use crate::types::{Error, Result};

/// MCP protocol revision this server speaks.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// The stdio-facing server value: routing table plus the two registries.
#[derive(Debug)]
pub struct McpServer {
    dispatcher: Dispatcher,
    prompts: PromptCatalog,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher, prompts: PromptCatalog) -> Self {
        Self { dispatcher, prompts }
    }

    /// Serve until the reader reaches EOF.
    ///
    /// Generic over the byte streams so tests can drive the full routing
    /// stack through an in-memory duplex pipe.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("gemini-mcp serving on stdio");

        while let Some(line) = codec::read_message(&mut reader).await? {
            if line.trim().is_empty() {
                continue;
            }

            let message: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("skipping unparseable message: {}", e);
                    continue;
                }
            };

            if let Some(response) = self.handle_message(&message).await {
                codec::write_message(&mut writer, &response).await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one decoded message. Notifications (no `id`) yield no response.
    pub async fn handle_message(&self, message: &Value) -> Option<Value> {
        let id = message.get("id")?.clone();
        let method = message.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let params = message.get("params").cloned().unwrap_or_else(|| json!({}));

        let outcome = match method {
            "initialize" => Ok(self.initialize_result(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_result()),
            "tools/call" => self.tools_call_result(&params).await,
            "prompts/list" => Ok(self.prompts_list_result()),
            "prompts/get" => self.prompts_get_result(&params),
            // No resources are exposed; answer with an empty list rather
            // than a method error so clients that always query it proceed.
            "resources/list" => Ok(json!({"resources": []})),
            _ => Err(Error::not_found(format!("Method not found: {}", method))),
        };

        Some(match outcome {
            Ok(result) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result,
            }),
            Err(e) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {
                    "code": e.json_rpc_code(),
                    "message": e.to_string(),
                }
            }),
        })
    }

    fn initialize_result(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .cloned()
            .unwrap_or_else(|| json!(PROTOCOL_VERSION));
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {},
                "prompts": {},
            },
            "serverInfo": {
                "name": "gemini-mcp",
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    fn tools_list_result(&self) -> Value {
        let tools: Vec<Value> = self
            .dispatcher
            .catalog()
            .entries()
            .iter()
            .map(|entry| {
                json!({
                    "name": entry.name,
                    "description": entry.description,
                    "inputSchema": entry.input_schema(),
                })
            })
            .collect();
        json!({"tools": tools})
    }

    async fn tools_call_result(&self, params: &Value) -> Result<Value> {
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::validation("tool call is missing 'name'"))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let text = self.dispatcher.dispatch(name, &arguments).await?;
        Ok(json!({
            "content": [{"type": "text", "text": text}],
        }))
    }

    fn prompts_list_result(&self) -> Value {
        let prompts: Vec<Value> = self
            .prompts
            .entries()
            .iter()
            .map(|entry| {
                let arguments: Vec<Value> = entry
                    .arguments
                    .iter()
                    .map(|a| {
                        json!({
                            "name": a.name,
                            "description": a.description,
                            "required": a.required,
                        })
                    })
                    .collect();
                json!({
                    "name": entry.name,
                    "description": entry.description,
                    "arguments": arguments,
                })
            })
            .collect();
        json!({"prompts": prompts})
    }

    fn prompts_get_result(&self, params: &Value) -> Result<Value> {
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::validation("prompt request is missing 'name'"))?;

        let arguments: HashMap<String, String> = params
            .get("arguments")
            .and_then(|v| v.as_object())
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let message = self.prompts.get_prompt(name, &arguments)?;
        let description = self.prompts.get(name).map(|e| e.description.clone());

        Ok(json!({
            "description": description,
            "messages": [{
                "role": message.role,
                "content": {"type": "text", "text": message.text},
            }],
        }))
    }
}

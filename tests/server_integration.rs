//! Stdio server integration tests — validates codec→routing→dispatch→response
//! round-trips over an in-memory duplex pipe.
//!
//! The dispatcher is wired to a real executor pointed at `echo`, so a tool
//! call exercises the probe and spawn path for real: the response text is the
//! argument vector `echo` received.

use std::sync::Arc;

use gemini_mcp::dispatch::Dispatcher;
use gemini_mcp::executor::GeminiExecutor;
use gemini_mcp::prompts::PromptCatalog;
use gemini_mcp::server::McpServer;
use gemini_mcp::types::ExecutorConfig;
use pretty_assertions::assert_eq;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, ReadHalf, WriteHalf};

type Client = (
    BufReader<ReadHalf<tokio::io::DuplexStream>>,
    WriteHalf<tokio::io::DuplexStream>,
);

/// Spin up a server over a duplex pipe, dispatching to `binary`.
fn start_test_server(binary: &str) -> (Client, tokio::task::JoinHandle<gemini_mcp::Result<()>>) {
    let (client_side, server_side) = tokio::io::duplex(64 * 1024);
    let binary = binary.to_string();

    let handle = tokio::spawn(async move {
        let config = ExecutorConfig {
            binary: binary.clone(),
            ..ExecutorConfig::default()
        };
        let runner = Arc::new(GeminiExecutor::new(config));
        let dispatcher = Dispatcher::new(binary, runner);
        let server = McpServer::new(dispatcher, PromptCatalog::builtin());

        let (read, write) = tokio::io::split(server_side);
        server.serve(BufReader::new(read), write).await
    });

    let (read, write) = tokio::io::split(client_side);
    ((BufReader::new(read), write), handle)
}

/// Send one request line and decode the next response line.
async fn round_trip(client: &mut Client, request: serde_json::Value) -> serde_json::Value {
    send(client, &request).await;
    receive(client).await
}

async fn send(client: &mut Client, message: &serde_json::Value) {
    let mut line = serde_json::to_vec(message).unwrap();
    line.push(b'\n');
    client.1.write_all(&line).await.unwrap();
}

async fn receive(client: &mut Client) -> serde_json::Value {
    let mut line = String::new();
    client.0.read_line(&mut line).await.unwrap();
    serde_json::from_str(&line).unwrap()
}

fn request(id: u64, method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

#[tokio::test]
async fn initialize_reports_server_info() {
    let (mut client, _handle) = start_test_server("echo");

    let response = round_trip(
        &mut client,
        request(1, "initialize", serde_json::json!({"protocolVersion": "2024-11-05"})),
    )
    .await;

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "gemini-mcp");
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn tools_list_returns_six_definitions() {
    let (mut client, _handle) = start_test_server("echo");

    let response = round_trip(&mut client, request(1, "tools/list", serde_json::json!({}))).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 6);
    assert_eq!(tools[0]["name"], "gemini_analyze_files");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");

    // Stable across calls.
    let again = round_trip(&mut client, request(2, "tools/list", serde_json::json!({}))).await;
    assert_eq!(response["result"], again["result"]);
}

#[tokio::test]
async fn tool_call_runs_command_end_to_end() {
    let (mut client, _handle) = start_test_server("echo");

    let response = round_trip(
        &mut client,
        request(
            3,
            "tools/call",
            serde_json::json!({
                "name": "gemini_analyze_files",
                "arguments": {"files": ["a.py", "b.py"], "prompt": "X"},
            }),
        ),
    )
    .await;

    // `echo` prints the argument vector it received.
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(text, "-p @a.py @b.py X\n");
}

#[tokio::test]
async fn unknown_tool_is_text_not_error() {
    let (mut client, _handle) = start_test_server("echo");

    let response = round_trip(
        &mut client,
        request(
            4,
            "tools/call",
            serde_json::json!({"name": "nope", "arguments": {}}),
        ),
    )
    .await;

    assert!(response.get("error").is_none());
    assert_eq!(
        response["result"]["content"][0]["text"],
        "Unknown tool: nope"
    );
}

#[tokio::test]
async fn missing_argument_is_invalid_params_error() {
    let (mut client, _handle) = start_test_server("echo");

    let response = round_trip(
        &mut client,
        request(
            5,
            "tools/call",
            serde_json::json!({
                "name": "gemini_analyze_files",
                "arguments": {"files": ["a.py"]},
            }),
        ),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.contains("missing required argument 'prompt'"));
}

#[tokio::test]
async fn missing_binary_surfaces_fixed_message() {
    let (mut client, _handle) = start_test_server("gemini-integration-missing-9917");

    let response = round_trip(
        &mut client,
        request(
            6,
            "tools/call",
            serde_json::json!({
                "name": "gemini_analyze_all_files",
                "arguments": {"prompt": "X"},
            }),
        ),
    )
    .await;

    assert_eq!(
        response["result"]["content"][0]["text"],
        "Error: Gemini CLI not found. Please install gemini CLI first."
    );
}

#[tokio::test]
async fn prompt_catalog_round_trip() {
    let (mut client, _handle) = start_test_server("echo");

    let listed = round_trip(&mut client, request(7, "prompts/list", serde_json::json!({}))).await;
    let prompts = listed["result"]["prompts"].as_array().unwrap();
    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[0]["name"], "analyze-codebase");

    let fetched = round_trip(
        &mut client,
        request(
            8,
            "prompts/get",
            serde_json::json!({
                "name": "verify-feature",
                "arguments": {"feature_name": "dark mode", "paths": "src ui"},
            }),
        ),
    )
    .await;

    let text = fetched["result"]["messages"][0]["content"]["text"]
        .as_str()
        .unwrap();
    assert!(text.contains("gemini_verify_implementation"));
    assert!(text.contains("\"dark mode\""));
}

#[tokio::test]
async fn unknown_prompt_is_hard_error() {
    let (mut client, _handle) = start_test_server("echo");

    let response = round_trip(
        &mut client,
        request(9, "prompts/get", serde_json::json!({"name": "nonexistent"})),
    )
    .await;

    assert_eq!(response["error"]["code"], -32601);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Unknown prompt: nonexistent"));
}

#[tokio::test]
async fn unknown_method_and_notifications() {
    let (mut client, _handle) = start_test_server("echo");

    // Notification: no id, must produce no response.
    send(
        &mut client,
        &serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;

    let response = round_trip(&mut client, request(10, "bogus/method", serde_json::json!({}))).await;

    // The first line back answers the request, not the notification.
    assert_eq!(response["id"], 10);
    assert_eq!(response["error"]["code"], -32601);
}

//! Line codec for the stdio JSON-RPC wire.
//!
//! MCP stdio transport frames one JSON-RPC message per line. Reading returns
//! `None` on clean EOF; writing appends the newline terminator and flushes so
//! the client sees each response immediately.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

/// Read one message line from the stream. Returns `None` on clean EOF.
pub async fn read_message<R: AsyncBufReadExt + Unpin>(
    reader: &mut R,
) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let bytes = reader.read_line(&mut line).await?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Encode a JSON value and write it as one line.
pub async fn write_message<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    value: &serde_json::Value,
) -> std::io::Result<()> {
    let mut buf = serde_json::to_vec(value).map_err(|e| {
        tracing::error!("response encoding failed: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await
}

use crate::error::Result;
use crate::tools::ToolInvocationHandler;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

use super::rpc::{handle_message, RpcResponse};

/// Serve newline-delimited JSON-RPC on stdin/stdout until stdin closes.
/// Each message is handled on its own task; replies are written in
/// completion order by a single writer.
pub async fn serve_stdio(handler: Arc<ToolInvocationHandler>) -> Result<()> {
    info!("Serving MCP over stdio");

    let (tx, mut rx) = mpsc::channel::<RpcResponse>(64);

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(response) = rx.recv().await {
            let line = match serde_json::to_string(&response) {
                Ok(line) => line,
                Err(e) => {
                    error!(error = %e, "Failed to encode response");
                    continue;
                }
            };
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<(), std::io::Error>(())
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let handler = Arc::clone(&handler);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = handle_message(&handler, &line).await {
                let _ = tx.send(response).await;
            }
        });
    }

    // Pending tasks hold their own senders; the writer drains until the last one finishes.
    drop(tx);
    writer
        .await
        .map_err(|e| crate::error::ShopCatchError::ServerError(format!("stdout writer failed: {}", e)))??;

    info!("stdin closed, shutting down");
    Ok(())
}

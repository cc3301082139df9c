use crate::error::{Result, ShopCatchError};
use crate::tools::ToolInvocationHandler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::rpc::handle_message;

pub fn router(handler: Arc<ToolInvocationHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/messages", post(messages))
        .route("/mcp", post(messages))
        .layer(cors)
        .with_state(handler)
}

pub async fn serve_http(handler: Arc<ToolInvocationHandler>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        ShopCatchError::ServerError(format!("failed to bind HTTP listener on {}: {}", addr, e))
    })?;
    info!(%addr, "Serving MCP over HTTP");

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ShopCatchError::ServerError(format!("HTTP server error: {}", e)))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn messages(State(handler): State<Arc<ToolInvocationHandler>>, body: String) -> Response {
    match handle_message(&handler, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, shutting down");
    }
}

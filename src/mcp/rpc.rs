use crate::tools::ToolInvocationHandler;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::types::{
    InitializeResult, McpToolCall, ServerCapabilities, ServerInfo, ToolListResponse,
    ToolsCapability,
};

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "shop-catch";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    // Missing version is answered with INVALID_REQUEST, not a parse error
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl RpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::error(None, PARSE_ERROR, message)
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(
            id,
            METHOD_NOT_FOUND,
            format!("Method '{}' is not supported by this server", method),
        )
    }
}

/// Decode one raw JSON-RPC message and dispatch it. Returns `None` when no
/// reply is owed (notifications).
pub async fn handle_message(handler: &ToolInvocationHandler, raw: &str) -> Option<RpcResponse> {
    match serde_json::from_str::<RpcRequest>(raw) {
        Ok(request) => dispatch(handler, request).await,
        Err(e) => {
            debug!(error = %e, "Rejecting malformed JSON-RPC message");
            Some(RpcResponse::parse_error(format!("Parse error: {}", e)))
        }
    }
}

pub async fn dispatch(handler: &ToolInvocationHandler, request: RpcRequest) -> Option<RpcResponse> {
    debug!(method = %request.method, id = ?request.id, "Received JSON-RPC message");

    if request.jsonrpc != "2.0" {
        return Some(RpcResponse::error(
            request.id,
            INVALID_REQUEST,
            "Unsupported jsonrpc version (expected 2.0)",
        ));
    }

    if request.is_notification() {
        debug!(method = %request.method, "Notification acknowledged");
        return None;
    }

    let id = request.id.clone();
    let response = match request.method.as_str() {
        "initialize" => to_response(id, &initialize_result()),
        "ping" => RpcResponse::success(id, json!({})),
        "tools/list" => to_response(
            id,
            &ToolListResponse {
                tools: handler.list_tools(),
            },
        ),
        "tools/call" => {
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<McpToolCall>(params) {
                Ok(tool_call) => {
                    let result = handler.call(&tool_call).await;
                    to_response(id, &result)
                }
                Err(e) => RpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("tools/call params must contain a tool name: {}", e),
                ),
            }
        }
        other => {
            warn!(method = other, "Unknown JSON-RPC method");
            RpcResponse::method_not_found(id, other)
        }
    };

    Some(response)
}

pub fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
        },
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
        },
    }
}

fn to_response<T: Serialize>(id: Option<Value>, result: &T) -> RpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => RpcResponse::success(id, value),
        Err(e) => RpcResponse::error(id, INTERNAL_ERROR, format!("Failed to encode result: {}", e)),
    }
}

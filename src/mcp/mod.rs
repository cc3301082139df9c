pub mod http;
pub mod rpc;
pub mod stdio;
pub mod types;

pub use http::{router, serve_http};
pub use rpc::{dispatch, handle_message, RpcRequest, RpcResponse};
pub use stdio::serve_stdio;
pub use types::{McpTool, McpToolCall, McpToolResult};

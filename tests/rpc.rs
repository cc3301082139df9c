use futures::future::BoxFuture;
use serde_json::{json, Value};
use shop_catch::error::UpstreamError;
use shop_catch::mcp::rpc::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use shop_catch::mcp::{dispatch, handle_message, router, RpcRequest};
use shop_catch::shopping::{ProductSearch, SearchRequest, SearchResponse};
use shop_catch::tools::{ToolInvocationHandler, ToolSettings};
use std::sync::Arc;
use tokio::net::TcpListener;

struct StaticSearch;

impl ProductSearch for StaticSearch {
    fn search<'a>(
        &'a self,
        _request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<SearchResponse, UpstreamError>> {
        Box::pin(async {
            Ok(serde_json::from_value(json!({
                "items": [
                    { "title": "<b>Candle</b> set", "link": "https://shop.example/c", "lprice": "15000" }
                ]
            }))
            .unwrap())
        })
    }
}

fn handler() -> Arc<ToolInvocationHandler> {
    Arc::new(ToolInvocationHandler::new(Arc::new(StaticSearch), ToolSettings::default()).unwrap())
}

fn request(id: Option<Value>, method: &str, params: Option<Value>) -> RpcRequest {
    RpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id,
    }
}

#[tokio::test]
async fn test_initialize_reports_server_info() {
    let handler = handler();
    let response = dispatch(&handler, request(Some(json!(1)), "initialize", Some(json!({}))))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "shop-catch");
    assert!(result["capabilities"]["tools"].is_object());
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn test_tools_list() {
    let handler = handler();
    let response = dispatch(&handler, request(Some(json!(2)), "tools/list", None))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["tools"][0]["name"], "search_naver_shopping");
    assert!(result["tools"][0]["inputSchema"].is_object());
}

#[tokio::test]
async fn test_tools_call_success() {
    let handler = handler();
    let response = dispatch(
        &handler,
        request(
            Some(json!("call-1")),
            "tools/call",
            Some(json!({ "name": "search_naver_shopping", "arguments": { "query": "candle" } })),
        ),
    )
    .await
    .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Candle set"));
    assert!(text.contains("15,000"));
}

#[tokio::test]
async fn test_tools_call_unknown_tool_is_error_result() {
    let handler = handler();
    let response = dispatch(
        &handler,
        request(
            Some(json!(3)),
            "tools/call",
            Some(json!({ "name": "delete_everything", "arguments": {} })),
        ),
    )
    .await
    .unwrap();

    assert!(response.error.is_none());
    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("Unknown tool"));
}

#[tokio::test]
async fn test_notifications_get_no_reply() {
    let handler = handler();
    let response = dispatch(&handler, request(None, "notifications/initialized", None)).await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_unknown_method() {
    let handler = handler();
    let response = dispatch(&handler, request(Some(json!(4)), "resources/list", None))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_message_is_parse_error() {
    let handler = handler();
    let response = handle_message(&handler, "{not json").await.unwrap();
    assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    assert!(response.id.is_none());
}

#[tokio::test]
async fn test_wrong_jsonrpc_version_is_invalid_request() {
    let handler = handler();
    let response = handle_message(&handler, r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#)
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn test_missing_jsonrpc_version_keeps_id() {
    let handler = handler();
    let response = handle_message(&handler, r#"{"id":"abc","method":"ping"}"#)
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    assert_eq!(response.id, Some(json!("abc")));
}

#[tokio::test]
async fn test_tools_call_without_name_is_invalid_params() {
    let handler = handler();
    let response = dispatch(&handler, request(Some(json!(5)), "tools/call", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    assert!(response.result.is_none());
    assert_eq!(response.id, Some(json!(5)));
}

#[tokio::test]
async fn test_http_router_serves_health_and_messages() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(handler());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({ "status": "ok" }));

    let listed: Value = client
        .post(format!("http://{}/messages", addr))
        .body(json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }).to_string())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["result"]["tools"][0]["name"], "search_naver_shopping");

    let notified = client
        .post(format!("http://{}/mcp", addr))
        .body(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(notified.status().as_u16(), 202);
}

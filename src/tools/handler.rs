use crate::config::Config;
use crate::error::{Result, ToolError, UpstreamError};
use crate::mcp::types::{McpTool, McpToolCall, McpToolResult};
use crate::shopping::{NaverShoppingClient, ProductSearch};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::criteria::SearchCriteria;
use super::format::{summarize, upstream_failure, FormattedResponse};
use super::registry::{ToolKind, ToolRegistry};

#[derive(Debug, Clone, Copy)]
pub struct ToolSettings {
    pub default_display: u32,
    pub timeout: Duration,
}

impl ToolSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_display: config.default_display,
            timeout: config.timeout,
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            default_display: 5,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Validates tool calls, runs the shopping search and renders the result.
/// Holds no mutable state; one instance serves every invocation.
pub struct ToolInvocationHandler {
    registry: ToolRegistry,
    search: Arc<dyn ProductSearch>,
    settings: ToolSettings,
}

impl ToolInvocationHandler {
    pub fn new(search: Arc<dyn ProductSearch>, settings: ToolSettings) -> Result<Self> {
        Ok(Self {
            registry: ToolRegistry::new(settings.default_display)?,
            search,
            settings,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = NaverShoppingClient::from_config(config)?;
        Self::new(Arc::new(client), ToolSettings::from_config(config))
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn list_tools(&self) -> Vec<McpTool> {
        self.registry.list()
    }

    pub async fn invoke(
        &self,
        name: &str,
        arguments: &Value,
    ) -> std::result::Result<FormattedResponse, ToolError> {
        let kind = self.registry.resolve(name)?;

        let empty = Map::new();
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(ToolError::invalid(
                    "arguments",
                    "Tool arguments must be a JSON object",
                ))
            }
        };

        self.registry.validate_arguments(kind, arguments)?;

        match kind {
            ToolKind::SearchShopping => self.search_shopping(arguments).await,
        }
    }

    /// Like [`invoke`](Self::invoke), with rejections folded into an error
    /// result so nothing escapes to the transport.
    pub async fn call(&self, tool_call: &McpToolCall) -> McpToolResult {
        match self.invoke(&tool_call.name, &tool_call.arguments).await {
            Ok(response) => McpToolResult::text(response.text(), response.is_error),
            Err(error) => {
                warn!(tool = %tool_call.name, %error, "Tool call rejected");
                McpToolResult::text(error.to_string(), true)
            }
        }
    }

    async fn search_shopping(
        &self,
        arguments: &Map<String, Value>,
    ) -> std::result::Result<FormattedResponse, ToolError> {
        let criteria = SearchCriteria::from_arguments(arguments, self.settings.default_display)?;
        let request = criteria.to_request();

        info!(
            query = %criteria.query,
            display = criteria.display,
            max_price = ?criteria.max_price,
            "Searching Naver Shopping"
        );

        let outcome = match timeout(self.settings.timeout, self.search.search(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(UpstreamError::Timeout(self.settings.timeout)),
        };

        match outcome {
            Ok(response) => {
                debug!(items = response.items().len(), "Shopping search succeeded");
                Ok(summarize(&response, &criteria))
            }
            Err(error) => {
                warn!(%error, "Shopping search failed");
                Ok(FormattedResponse::error(upstream_failure(&error)))
            }
        }
    }
}

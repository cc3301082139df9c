use crate::config::{MAX_DISPLAY, MIN_DISPLAY};
use crate::error::{Result, ShopCatchError, ToolError};
use crate::mcp::types::McpTool;
use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Map, Value};

/// Every tool this server knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchShopping,
}

impl ToolKind {
    pub const ALL: [ToolKind; 1] = [ToolKind::SearchShopping];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchShopping => "search_naver_shopping",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::SearchShopping => {
                "Search Naver Shopping for the lowest-priced products matching a keyword. \
                 Accepts a plain `query`, or a gift request described by `recipient` and \
                 `occasion` (plus optional `preference` and `full_context`). Optional \
                 `min_price`/`max_price` bound the price; when both top results fit under \
                 `max_price` a bundle is suggested."
            }
        }
    }

    pub fn input_schema(self, default_display: u32) -> Value {
        match self {
            ToolKind::SearchShopping => {
                let price = |description: &str| {
                    json!({
                        "type": ["integer", "string"],
                        "minimum": 0,
                        "pattern": "^\\s*[0-9][0-9,]*\\s*$",
                        "description": description
                    })
                };

                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Product keyword to search for"
                        },
                        "recipient": {
                            "type": "string",
                            "description": "Who the gift is for (e.g. \"mother in her 50s\")"
                        },
                        "occasion": {
                            "type": "string",
                            "description": "Why the gift is given (e.g. \"birthday\")"
                        },
                        "preference": {
                            "type": "string",
                            "description": "Tastes or constraints worth searching for"
                        },
                        "full_context": {
                            "type": "string",
                            "description": "Any remaining free-form description of the request"
                        },
                        "display": {
                            "type": "integer",
                            "minimum": MIN_DISPLAY,
                            "maximum": MAX_DISPLAY,
                            "default": default_display,
                            "description": "Number of results to request (1-100)"
                        },
                        "min_price": price("Lowest acceptable price"),
                        "max_price": price("Highest acceptable price, also used as the bundle budget")
                    },
                    "anyOf": [
                        { "required": ["query"] },
                        { "required": ["recipient", "occasion"] }
                    ]
                })
            }
        }
    }
}

struct RegisteredTool {
    kind: ToolKind,
    descriptor: McpTool,
    schema: JSONSchema,
}

/// The fixed tool catalog with each input schema compiled once.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new(default_display: u32) -> Result<Self> {
        let mut tools = Vec::with_capacity(ToolKind::ALL.len());

        for kind in ToolKind::ALL {
            let input_schema = kind.input_schema(default_display);
            let schema = JSONSchema::options()
                .with_draft(Draft::Draft7)
                .compile(&input_schema)
                .map_err(|e| {
                    ShopCatchError::Other(format!("Invalid schema for tool '{}': {}", kind.name(), e))
                })?;

            tools.push(RegisteredTool {
                kind,
                descriptor: McpTool {
                    name: kind.name().to_string(),
                    description: Some(kind.description().to_string()),
                    input_schema,
                },
                schema,
            });
        }

        Ok(Self { tools })
    }

    pub fn list(&self) -> Vec<McpTool> {
        self.tools.iter().map(|tool| tool.descriptor.clone()).collect()
    }

    pub fn resolve(&self, name: &str) -> std::result::Result<ToolKind, ToolError> {
        ToolKind::from_name(name)
            .filter(|kind| self.tools.iter().any(|tool| tool.kind == *kind))
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Check presence of the required fields first so the error can name
    /// them, then run the full schema.
    pub fn validate_arguments(
        &self,
        kind: ToolKind,
        arguments: &Map<String, Value>,
    ) -> std::result::Result<(), ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.kind == kind)
            .ok_or_else(|| ToolError::UnknownTool(kind.name().to_string()))?;

        match kind {
            ToolKind::SearchShopping => check_search_required(arguments)?,
        }

        // An explicit null means the same as leaving the field out
        let instance: Map<String, Value> = arguments
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let instance = Value::Object(instance);
        if let Err(mut errors) = tool.schema.validate(&instance) {
            if let Some(error) = errors.next() {
                let path = error.instance_path.to_string();
                let field = path.trim_start_matches('/').split('/').next().unwrap_or("");
                let field = if field.is_empty() { "arguments" } else { field };
                return Err(ToolError::invalid(field, format!("{}: {}", field, error)));
            }
        }

        Ok(())
    }
}

fn check_search_required(arguments: &Map<String, Value>) -> std::result::Result<(), ToolError> {
    let present = |key: &str| arguments.get(key).is_some_and(|value| !value.is_null());

    if present("query") {
        return Ok(());
    }

    match (present("recipient"), present("occasion")) {
        (true, true) => Ok(()),
        (true, false) => Err(ToolError::missing("occasion")),
        (false, true) => Err(ToolError::missing("recipient")),
        (false, false) => Err(ToolError::invalid(
            "query",
            "Missing required argument: query (or recipient and occasion)",
        )),
    }
}

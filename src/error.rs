use std::fmt;
use std::time::Duration;

/// Application-level failures: configuration, I/O and serving.
#[derive(Debug)]
pub enum ShopCatchError {
    ConfigError(String),
    ServerError(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    HttpClientError(reqwest::Error),
    Other(String),
}

impl fmt::Display for ShopCatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopCatchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ShopCatchError::ServerError(msg) => write!(f, "Server error: {}", msg),
            ShopCatchError::IoError(e) => write!(f, "IO error: {}", e),
            ShopCatchError::JsonError(e) => write!(f, "JSON error: {}", e),
            ShopCatchError::YamlError(e) => write!(f, "YAML error: {}", e),
            ShopCatchError::HttpClientError(e) => write!(f, "HTTP client error: {}", e),
            ShopCatchError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ShopCatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShopCatchError::IoError(e) => Some(e),
            ShopCatchError::JsonError(e) => Some(e),
            ShopCatchError::YamlError(e) => Some(e),
            ShopCatchError::HttpClientError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShopCatchError {
    fn from(err: std::io::Error) -> Self {
        ShopCatchError::IoError(err)
    }
}

impl From<serde_json::Error> for ShopCatchError {
    fn from(err: serde_json::Error) -> Self {
        ShopCatchError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for ShopCatchError {
    fn from(err: serde_yaml::Error) -> Self {
        ShopCatchError::YamlError(err)
    }
}

impl From<reqwest::Error> for ShopCatchError {
    fn from(err: reqwest::Error) -> Self {
        ShopCatchError::HttpClientError(err)
    }
}

impl From<anyhow::Error> for ShopCatchError {
    fn from(err: anyhow::Error) -> Self {
        ShopCatchError::ConfigError(format!("{:#}", err))
    }
}

impl From<String> for ShopCatchError {
    fn from(msg: String) -> Self {
        ShopCatchError::Other(msg)
    }
}

impl From<&str> for ShopCatchError {
    fn from(msg: &str) -> Self {
        ShopCatchError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShopCatchError>;

/// Rejections produced before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    UnknownTool(String),
    InvalidArgument { field: String, message: String },
}

impl ToolError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ToolError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        ToolError::invalid(field, format!("Missing required argument: {}", field))
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            ToolError::InvalidArgument { message, .. } => write!(f, "Invalid argument: {}", message),
        }
    }
}

impl std::error::Error for ToolError {}

/// Failures of the single outbound search request.
#[derive(Debug)]
pub enum UpstreamError {
    Status { status: u16, body: String },
    Network(String),
    Timeout(Duration),
    Decode(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Status { status, body } => {
                write!(f, "upstream returned status {}: {}", status, body)
            }
            UpstreamError::Network(msg) => write!(f, "connection failed: {}", msg),
            UpstreamError::Timeout(after) => {
                write!(f, "request timed out after {} seconds", after.as_secs())
            }
            UpstreamError::Decode(msg) => write!(f, "unreadable response: {}", msg),
        }
    }
}

impl std::error::Error for UpstreamError {}

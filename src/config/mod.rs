mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::error::{Result, ShopCatchError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use api::{ApiConfig, SearchConfig, ServerConfig, SessionConfig};
pub use defaults::{MAX_DISPLAY, MIN_DISPLAY, NAVER_SHOPPING_ENDPOINT};
pub use validation::expand_with;

pub const CLIENT_ID_VAR: &str = "NAVER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "NAVER_CLIENT_SECRET";

/// Naver Open API credentials, sent as request headers on every search.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keep both halves of the key pair out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"<hidden>")
            .field("client_secret", &"<hidden>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api_endpoint: String,
    pub timeout: Duration,
    pub default_display: u32,
    pub bind: SocketAddr,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Build the process-wide configuration from the CLI, the environment and
    /// the first config file found. Called once at startup.
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = match args.config.as_deref() {
            Some(path) => FileConfig::load_from(Path::new(path))?,
            None => FileConfig::load()?,
        };

        Self::resolve(args, &file_config, |name| env::var(name).ok())
    }

    /// Precedence for every setting: CLI args > env var > config file > default.
    pub fn resolve<F>(args: &Args, file_config: &FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Credentials only ever come from the environment
        let client_id = required_var(&lookup, CLIENT_ID_VAR)?;
        let client_secret = required_var(&lookup, CLIENT_SECRET_VAR)?;

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| lookup("NAVER_API_ENDPOINT"))
            .or_else(|| {
                file_config
                    .api
                    .endpoint
                    .as_deref()
                    .map(|endpoint| expand_with(endpoint, &lookup))
            })
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or_else(defaults::default_endpoint);

        let env_timeout = match lookup("SHOP_CATCH_TIMEOUT") {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|e| {
                ShopCatchError::ConfigError(format!(
                    "Invalid SHOP_CATCH_TIMEOUT '{}': {}",
                    value, e
                ))
            })?),
            None => None,
        };
        let timeout_secs = args
            .timeout
            .or(env_timeout)
            .or(file_config.api.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(defaults::default_timeout_secs);

        let default_display = file_config
            .search
            .default_display
            .unwrap_or_else(defaults::default_display)
            .clamp(MIN_DISPLAY, MAX_DISPLAY);

        let bind = args
            .http_addr()
            .map(str::to_string)
            .or_else(|| lookup("PORT").map(|port| format!("0.0.0.0:{}", port.trim())))
            .or_else(|| file_config.server.bind.clone())
            .unwrap_or_else(defaults::default_bind);
        let bind: SocketAddr = bind.parse().map_err(|e| {
            ShopCatchError::ConfigError(format!("Invalid bind address '{}': {}", bind, e))
        })?;

        let verbose = args.verbose
            || lookup("SHOP_CATCH_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        Ok(Config {
            credentials: Credentials::new(client_id, client_secret),
            api_endpoint,
            timeout: Duration::from_secs(timeout_secs),
            default_display,
            bind,
            verbose,
        })
    }
}

fn required_var<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            ShopCatchError::ConfigError(format!("{} environment variable not set", name))
        })
}

impl FileConfig {
    /// Load the first config file found in the search path, or defaults.
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config: FileConfig = if extension == Some("json") {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        } else {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (local override)
        paths.push(PathBuf::from(".shop-catch.yaml"));
        paths.push(PathBuf::from(".shop-catch.yml"));
        paths.push(PathBuf::from(".shop-catch.json"));

        // 2. User's config directory
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("shop-catch");
            paths.push(config_dir.join("shop-catch.yaml"));
            paths.push(config_dir.join("shop-catch.yml"));
            paths.push(config_dir.join("shop-catch.json"));
        }

        paths
    }

    pub fn example() -> Self {
        FileConfig {
            api: ApiConfig {
                endpoint: Some(defaults::default_endpoint()),
                timeout_secs: Some(defaults::default_timeout_secs()),
            },
            search: SearchConfig {
                default_display: Some(defaults::default_display()),
            },
            server: ServerConfig {
                bind: Some(defaults::default_bind()),
            },
            session: SessionConfig {
                verbose: Some(false),
            },
        }
    }

    /// Write the example config to `path`. Refuses to overwrite an existing file.
    pub fn write_example(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ShopCatchError::ConfigError(format!(
                "Config file already exists: {}",
                path.display()
            )));
        }

        let yaml = serde_yaml::to_string(&Self::example())?;
        let contents = format!(
            "# shop-catch configuration\n# Credentials are read from {} and {} (environment or .env).\n{}",
            CLIENT_ID_VAR, CLIENT_SECRET_VAR, yaml
        );
        fs::write(path, contents)?;
        Ok(())
    }
}

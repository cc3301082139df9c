use clap::Parser;
use colored::*;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{debug, info};

use shop_catch::cli::Args;
use shop_catch::config::{Config, FileConfig};
use shop_catch::logging::init_tracing;
use shop_catch::mcp::{serve_http, serve_stdio};
use shop_catch::tools::ToolInvocationHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.config_init {
        let path = Path::new(".shop-catch.yaml");
        match FileConfig::write_example(path) {
            Ok(()) => {
                println!("{}", format!("Created {}", path.display()).green());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                process::exit(1);
            }
        }
    }

    // A missing .env is fine; credentials may already be in the environment
    let _ = dotenvy::dotenv();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    init_tracing(config.verbose);
    debug!(
        endpoint = %config.api_endpoint,
        timeout_secs = config.timeout.as_secs(),
        default_display = config.default_display,
        "Configuration loaded"
    );

    let handler = Arc::new(ToolInvocationHandler::from_config(&config)?);
    info!(
        tools = handler.list_tools().len(),
        version = env!("CARGO_PKG_VERSION"),
        "Starting shop-catch"
    );

    if args.serve_http() {
        serve_http(handler, config.bind).await?;
    } else {
        serve_stdio(handler).await?;
    }

    Ok(())
}

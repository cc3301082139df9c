use clap::Parser;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "shop-catch")]
#[command(about = "MCP tool server for Naver Shopping product search", long_about = None)]
pub struct Args {
    /// `--http` alone serves on the configured address; `--http ADDR` overrides it.
    #[arg(
        long = "http",
        value_name = "ADDR",
        num_args = 0..=1,
        default_missing_value = "",
        help = "Serve over HTTP instead of stdio, optionally on ADDR (e.g., 127.0.0.1:10000)"
    )]
    pub http: Option<String>,

    #[arg(short = 'c', long = "config", help = "Path to a YAML or JSON config file")]
    pub config: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Override the shopping search endpoint URL"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "timeout", help = "Upstream request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        long = "config-init",
        help = "Write an example .shop-catch.yaml in the current directory"
    )]
    pub config_init: bool,
}

impl Args {
    pub fn serve_http(&self) -> bool {
        self.http.is_some()
    }

    /// The address given to `--http`, if any.
    pub fn http_addr(&self) -> Option<&str> {
        self.http
            .as_deref()
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
    }
}

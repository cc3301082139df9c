use clap::Parser;
use colored::*;
use serde_json::Value;

use shop_catch::cli::Args as ServerArgs;
use shop_catch::config::Config;
use shop_catch::shopping::{NaverShoppingClient, SearchResponse};
use shop_catch::tools::{summarize, SearchCriteria};

/// Send one search straight to the upstream API and dump what comes back.
#[derive(Parser, Debug)]
#[command(name = "check-raw")]
struct Args {
    #[arg(long = "display", default_value_t = 5)]
    display: u32,

    #[arg(long = "min-price")]
    min_price: Option<u64>,

    #[arg(long = "max-price")]
    max_price: Option<u64>,

    #[arg(required = true, help = "Search keyword")]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _ = dotenvy::dotenv();

    let config = Config::from_env_and_args(&ServerArgs::default()).unwrap_or_else(|e| {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    });

    let criteria = SearchCriteria {
        query: args.query.join(" ").trim().to_string(),
        display: args.display,
        min_price: args.min_price,
        max_price: args.max_price,
    };
    let request = criteria.to_request();
    let client = NaverShoppingClient::from_config(&config)?;

    println!("{}", format!("Endpoint: {}", client.endpoint()).green());
    println!("{}", format!("Query: {}", criteria.query).cyan());
    println!("{}", "Request parameters:".bold());
    for (key, value) in request.query_params() {
        println!("  {} = {}", key.yellow(), value);
    }
    println!("{}", "-".repeat(80).dimmed());

    let (status, body) = match client.fetch_raw(&request).await {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    if !(200..300).contains(&status) {
        eprintln!("{}", format!("Error: HTTP {}", status).red());
        eprintln!("{}", body);
        std::process::exit(1);
    }

    println!("{}", format!("HTTP {}", status).green());
    println!("{}", "Raw response:".bold());
    match serde_json::from_str::<Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", body.dimmed()),
    }
    println!("{}", "-".repeat(80).dimmed());

    match serde_json::from_str::<SearchResponse>(&body) {
        Ok(response) => {
            println!("{}", "Formatted result:".bold());
            println!("{}", summarize(&response, &criteria).text());
        }
        Err(e) => {
            eprintln!("{}", format!("Response does not decode as a search result: {}", e).red());
        }
    }

    Ok(())
}

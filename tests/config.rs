use clap::Parser;
use shop_catch::cli::Args;
use shop_catch::config::{Config, FileConfig, NAVER_SHOPPING_ENDPOINT};
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn with_credentials(extra: &[(&str, &str)]) -> HashMap<String, String> {
    let mut vars = env(&[("NAVER_CLIENT_ID", "id"), ("NAVER_CLIENT_SECRET", "secret")]);
    vars.extend(env(extra));
    vars
}

#[test]
fn test_defaults_with_credentials_only() {
    let vars = with_credentials(&[]);
    let config = Config::resolve(&Args::default(), &FileConfig::default(), |k| vars.get(k).cloned())
        .unwrap();

    assert_eq!(config.credentials.client_id, "id");
    assert_eq!(config.credentials.client_secret, "secret");
    assert_eq!(config.api_endpoint, NAVER_SHOPPING_ENDPOINT);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.default_display, 5);
    assert_eq!(config.bind.to_string(), "0.0.0.0:10000");
    assert!(!config.verbose);
}

#[test]
fn test_missing_credentials_is_config_error() {
    let vars = env(&[("NAVER_CLIENT_ID", "id")]);
    let err = Config::resolve(&Args::default(), &FileConfig::default(), |k| vars.get(k).cloned())
        .unwrap_err();
    assert!(err.to_string().contains("NAVER_CLIENT_SECRET"));

    let blank = env(&[("NAVER_CLIENT_ID", "  "), ("NAVER_CLIENT_SECRET", "s")]);
    let err = Config::resolve(&Args::default(), &FileConfig::default(), |k| blank.get(k).cloned())
        .unwrap_err();
    assert!(err.to_string().contains("NAVER_CLIENT_ID"));
}

#[test]
fn test_credentials_hidden_from_debug_output() {
    let vars = env(&[
        ("NAVER_CLIENT_ID", "client-id-value"),
        ("NAVER_CLIENT_SECRET", "client-secret-value"),
    ]);
    let config = Config::resolve(&Args::default(), &FileConfig::default(), |k| vars.get(k).cloned())
        .unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("client-id-value"));
    assert!(!debug.contains("client-secret-value"));
    assert!(debug.contains("<hidden>"));
}

#[test]
fn test_precedence_cli_env_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shop.yaml");
    fs::write(
        &path,
        "api:\n  endpoint: ${MOCK_HOST}/shop.json\n  timeout_secs: 3\nsearch:\n  default_display: 250\nserver:\n  bind: 127.0.0.1:9000\nsession:\n  verbose: true\n",
    )
    .unwrap();
    let file_config = FileConfig::load_from(&path).unwrap();

    // File only
    let vars = with_credentials(&[("MOCK_HOST", "http://localhost:8080")]);
    let config = Config::resolve(&Args::default(), &file_config, |k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.api_endpoint, "http://localhost:8080/shop.json");
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.default_display, 100);
    assert_eq!(config.bind.to_string(), "127.0.0.1:9000");
    assert!(config.verbose);

    // Env over file
    let vars = with_credentials(&[
        ("NAVER_API_ENDPOINT", "http://env.example/shop.json"),
        ("SHOP_CATCH_TIMEOUT", "7"),
        ("PORT", "4000"),
        ("SHOP_CATCH_VERBOSE", "false"),
    ]);
    let config = Config::resolve(&Args::default(), &file_config, |k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.api_endpoint, "http://env.example/shop.json");
    assert_eq!(config.timeout, Duration::from_secs(7));
    assert_eq!(config.bind.to_string(), "0.0.0.0:4000");
    assert!(!config.verbose);

    // CLI over env
    let args = Args {
        api_endpoint: Some("http://cli.example/shop.json".to_string()),
        timeout: Some(2),
        http: Some("127.0.0.1:5555".to_string()),
        verbose: true,
        ..Args::default()
    };
    let config = Config::resolve(&args, &file_config, |k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.api_endpoint, "http://cli.example/shop.json");
    assert_eq!(config.timeout, Duration::from_secs(2));
    assert_eq!(config.bind.to_string(), "127.0.0.1:5555");
    assert!(config.verbose);
    assert!(args.serve_http());
}

#[test]
fn test_invalid_bind_address() {
    let vars = with_credentials(&[]);
    let args = Args {
        http: Some("not-an-address".to_string()),
        ..Args::default()
    };
    let err = Config::resolve(&args, &FileConfig::default(), |k| vars.get(k).cloned()).unwrap_err();
    assert!(err.to_string().contains("not-an-address"));
}

#[test]
fn test_json_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shop.json");
    fs::write(&path, r#"{ "api": { "timeout_secs": 4 } }"#).unwrap();

    let file_config = FileConfig::load_from(&path).unwrap();
    assert_eq!(file_config.api.timeout_secs, Some(4));
    assert!(file_config.api.endpoint.is_none());
}

#[test]
fn test_malformed_config_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shop.yaml");
    fs::write(&path, "api: [unclosed").unwrap();

    let err = FileConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse YAML config file"));
}

#[test]
fn test_write_example_round_trips_and_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".shop-catch.yaml");

    FileConfig::write_example(&path).unwrap();
    let loaded = FileConfig::load_from(&path).unwrap();
    assert_eq!(loaded.api.endpoint.as_deref(), Some(NAVER_SHOPPING_ENDPOINT));
    assert_eq!(loaded.search.default_display, Some(5));

    assert!(FileConfig::write_example(&path).is_err());
}

#[test]
fn test_http_flag_with_and_without_address() {
    let vars = with_credentials(&[]);

    let args = Args::try_parse_from(["shop-catch", "--http", "127.0.0.1:5555"]).unwrap();
    assert!(args.serve_http());
    let config = Config::resolve(&args, &FileConfig::default(), |k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.bind.to_string(), "127.0.0.1:5555");

    let args = Args::try_parse_from(["shop-catch", "--http", "--verbose"]).unwrap();
    assert!(args.serve_http());
    assert!(args.verbose);
    let config = Config::resolve(&args, &FileConfig::default(), |k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.bind.to_string(), "0.0.0.0:10000");

    let args = Args::try_parse_from(["shop-catch"]).unwrap();
    assert!(!args.serve_http());
}

#[test]
fn test_invalid_timeout_env_is_config_error() {
    let vars = with_credentials(&[("SHOP_CATCH_TIMEOUT", "abc")]);
    let err = Config::resolve(&Args::default(), &FileConfig::default(), |k| vars.get(k).cloned())
        .unwrap_err();
    assert!(err.to_string().contains("SHOP_CATCH_TIMEOUT"));
}

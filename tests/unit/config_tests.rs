use std::path::PathBuf;
use std::time::Duration;

use draft_room::{config::GlobalConfig, AppError};

fn sample_toml() -> &'static str {
    r#"
host = "0.0.0.0"
http_port = 9090
ws_path = "/draft"
catalog_path = "teams.txt"
rounds = 4

[timeouts]
turn_seconds = 30
"#
}

#[test]
fn parses_valid_config() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("config parses");

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.ws_path, "/draft");
    assert_eq!(config.catalog_path, PathBuf::from("teams.txt"));
    assert_eq!(config.rounds, 4);
    assert_eq!(config.timeouts.turn_seconds, 30);
}

#[test]
fn empty_config_uses_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("empty config parses");
    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.ws_path, "/ws");
    assert_eq!(config.catalog_path, PathBuf::from("nfl_teams.txt"));
    assert_eq!(config.rounds, 6);
    assert_eq!(config.timeouts.turn_seconds, 0);
}

#[test]
fn default_config_is_valid() {
    assert!(GlobalConfig::default().validate().is_ok());
}

#[test]
fn bind_addr_joins_host_and_port() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("config parses");
    assert_eq!(config.bind_addr(), "0.0.0.0:9090");
}

#[test]
fn zero_turn_seconds_disables_timeout() {
    assert_eq!(GlobalConfig::default().turn_timeout(), None);
}

#[test]
fn turn_seconds_maps_to_duration() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("config parses");
    assert_eq!(config.turn_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn rejects_zero_rounds() {
    let result = GlobalConfig::from_toml_str("rounds = 0");
    assert!(
        matches!(result, Err(AppError::Config(ref msg)) if msg.contains("rounds")),
        "expected rounds error, got {result:?}"
    );
}

#[test]
fn rejects_ws_path_without_leading_slash() {
    let result = GlobalConfig::from_toml_str(r#"ws_path = "ws""#);
    assert!(matches!(result, Err(AppError::Config(ref msg)) if msg.contains("ws_path")));
}

#[test]
fn rejects_ws_path_shadowing_builtin_route() {
    let result = GlobalConfig::from_toml_str(r#"ws_path = "/health""#);
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn rejects_empty_catalog_path() {
    let result = GlobalConfig::from_toml_str(r#"catalog_path = """#);
    assert!(matches!(result, Err(AppError::Config(ref msg)) if msg.contains("catalog_path")));
}

#[test]
fn rejects_malformed_toml() {
    let result = GlobalConfig::from_toml_str("rounds = [");
    assert!(
        matches!(result, Err(AppError::Config(ref msg)) if msg.starts_with("invalid config")),
        "expected parse error, got {result:?}"
    );
}

#[test]
fn rejects_wrong_field_type() {
    let result = GlobalConfig::from_toml_str(r#"http_port = "eighty""#);
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn load_from_path_reads_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("config.toml");
    std::fs::write(&path, sample_toml()).expect("write config");

    let config = GlobalConfig::load_from_path(&path).expect("config loads");
    assert_eq!(config.rounds, 4);
}

#[test]
fn load_from_missing_path_is_config_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let result = GlobalConfig::load_from_path(temp.path().join("missing.toml"));
    assert!(
        matches!(result, Err(AppError::Config(ref msg)) if msg.contains("failed to read config")),
        "expected read error, got {result:?}"
    );
}

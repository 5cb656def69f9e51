use std::time::Duration;

use tempfile::TempDir;
use wmstatus::cli::build_cli;
use wmstatus::commands::run::resolve_config;
use wmstatus::core::config::{Config, SinkKind};

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "  \n").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "period_ms": 50, "sink": "stdout", "peer": "dwm" }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.period(), Duration::from_millis(50));
    assert_eq!(config.sink, SinkKind::Stdout);
    assert_eq!(config.peer.as_deref(), Some("dwm"));
    assert_eq!(config.capacity, 64);
    assert!(config.layout);
}

#[test]
fn test_config_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");
    let config = Config {
        capacity: 80,
        drift_correction: false,
        ..Config::default()
    };

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_config_invalid_json_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ period_ms: ").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_config_zero_capacity_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "capacity": 0 }"#).unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_cli_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{ "period_ms": 50, "capacity": 32 }"#).unwrap();

    let matches = build_cli()
        .try_get_matches_from([
            "wmstatus",
            "--config",
            path.to_str().unwrap(),
            "--period",
            "250",
            "--sink",
            "stdout",
            "--no-layout",
            "--no-drift-correction",
        ])
        .unwrap();
    let config = resolve_config(&matches).unwrap();

    assert_eq!(config.period_ms, 250);
    assert_eq!(config.capacity, 32);
    assert_eq!(config.sink, SinkKind::Stdout);
    assert!(!config.layout);
    assert!(!config.drift_correction);
}

#[test]
fn test_cli_rejects_zero_period_and_unknown_sink() {
    assert!(build_cli()
        .try_get_matches_from(["wmstatus", "--period", "0"])
        .is_err());
    assert!(build_cli()
        .try_get_matches_from(["wmstatus", "--sink", "wayland"])
        .is_err());
}

use tempfile::TempDir;
use wmstatus::commands::run::build_sources;
use wmstatus::core::config::Config;
use wmstatus::core::status::{Compositor, DEFAULT_CAPACITY};

use super::common::{meminfo, write_battery};

fn config_for(dir: &TempDir) -> Config {
    let meminfo_path = dir.path().join("meminfo");
    std::fs::write(&meminfo_path, meminfo(4_000_000, 1_000_000, 0, 500_000, 0)).unwrap();

    Config {
        meminfo_path,
        battery_capacity_path: dir.path().join("capacity"),
        battery_status_path: dir.path().join("status"),
        layout: false,
        ..Config::default()
    }
}

#[test]
fn test_build_sources_order_without_layout() {
    let dir = TempDir::new().unwrap();
    let sources = build_sources(&config_for(&dir)).unwrap();
    let compositor = Compositor::new(sources, DEFAULT_CAPACITY);

    assert_eq!(compositor.source_names(), vec!["ram", "battery", "clock"]);
}

#[test]
fn test_build_sources_compose() {
    let dir = TempDir::new().unwrap();
    write_battery(dir.path(), "5\n", "Discharging\n");
    let sources = build_sources(&config_for(&dir)).unwrap();
    let mut compositor = Compositor::new(sources, DEFAULT_CAPACITY);

    let line = compositor.compose().as_str().to_string();
    assert!(line.starts_with("2.38 GiB/3.81 GiB | 5 % | "), "{}", line);
}

#[test]
fn test_build_sources_missing_meminfo_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        meminfo_path: dir.path().join("absent"),
        layout: false,
        ..Config::default()
    };
    assert!(build_sources(&config).is_err());
}

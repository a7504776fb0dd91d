//! Configuration file loading through the public CLI API

use clap::Parser;
use ringq::app::cli::{Args, ConfigError};
use std::ffi::OsStr;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_config_file_values_are_applied() {
    let file = config_file(
        r#"
        capacity = 32
        producers = 3
        items = 400
        grace-ms = 0
        record = true
        "#,
    );
    let mut args = Args::try_parse_from([
        OsStr::new("ringq"),
        OsStr::new("--config-file"),
        file.path().as_os_str(),
    ])
    .unwrap();

    let loaded = args.apply_config_file().unwrap();
    assert_eq!(loaded.as_deref(), Some(file.path()));

    let config = args.run_config().unwrap();
    assert_eq!(config.capacity, 32);
    assert_eq!(config.producers, 3);
    assert_eq!(config.consumers, 2);
    assert_eq!(config.items_per_producer, 400);
    assert_eq!(config.grace, Duration::ZERO);
    assert!(config.record_items);
}

#[test]
fn test_command_line_overrides_config_file() {
    let file = config_file("capacity = 32\nconsumers = 6\n");
    let mut args = Args::try_parse_from([
        OsStr::new("ringq"),
        OsStr::new("-n"),
        OsStr::new("4"),
        OsStr::new("-c"),
        file.path().as_os_str(),
    ])
    .unwrap();

    args.apply_config_file().unwrap();
    let config = args.run_config().unwrap();
    assert_eq!(config.capacity, 4);
    assert_eq!(config.consumers, 6);
}

#[test]
fn test_malformed_config_file_is_a_parse_error() {
    let file = config_file("capacity = [unterminated");
    let mut args = Args {
        config_file: Some(file.path().to_path_buf()),
        ..Args::default()
    };

    match args.apply_config_file() {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_invalid_value_in_config_file() {
    let file = config_file("consumers = 0\n");
    let mut args = Args {
        config_file: Some(file.path().to_path_buf()),
        ..Args::default()
    };

    // Zero is a well-formed integer; it is rejected when the run is built
    args.apply_config_file().unwrap();
    assert!(matches!(args.run_config(), Err(ConfigError::Run(_))));
}

#[test]
fn test_missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = Args {
        config_file: Some(dir.path().join("absent.toml")),
        ..Args::default()
    };

    let err = args.apply_config_file().unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

//! Tests for configuration resolution
//!
//! Priority order: CLI > environment > TOML file > compiled defaults.
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests that
//! touch SONGBOOK_* variables are marked #[serial].

use serial_test::serial;
use songbook_common::config::{
    CompiledDefaults, ConfigOverrides, ServerConfig, TomlConfig, ENV_CONFIG, ENV_DATABASE,
    ENV_HOST, ENV_PORT, MAX_SESSION_TTL_HOURS,
};
use songbook_common::Error;
use std::env;
use std::io::Write;
use std::path::PathBuf;

fn clear_env() {
    for var in [ENV_HOST, ENV_PORT, ENV_DATABASE, ENV_CONFIG] {
        env::remove_var(var);
    }
}

#[test]
fn test_compiled_defaults() {
    let defaults = CompiledDefaults::for_current_platform();
    assert_eq!(defaults.host, "127.0.0.1");
    assert_eq!(defaults.port, 5780);
    assert!(defaults.database_path.ends_with("songbook.db"));
    assert_eq!(defaults.session_ttl_hours, 168);
}

#[test]
#[serial]
fn test_defaults_used_when_nothing_configured() {
    clear_env();
    let defaults = CompiledDefaults::for_current_platform();

    let config = ServerConfig::from_sources(
        &ConfigOverrides::default(),
        &TomlConfig::default(),
        &defaults,
    )
    .unwrap();

    assert_eq!(config.host, defaults.host);
    assert_eq!(config.port, defaults.port);
    assert_eq!(config.database_path, defaults.database_path);
    assert_eq!(config.bind_address(), "127.0.0.1:5780");
}

#[test]
#[serial]
fn test_priority_order() {
    clear_env();
    let defaults = CompiledDefaults::for_current_platform();
    let file = TomlConfig {
        host: Some("0.0.0.0".to_string()),
        port: Some(6000),
        database: Some(PathBuf::from("/srv/file.db")),
        session_ttl_hours: Some(2),
    };

    // File beats defaults
    let config = ServerConfig::from_sources(&ConfigOverrides::default(), &file, &defaults).unwrap();
    assert_eq!(config.port, 6000);
    assert_eq!(config.session_ttl_hours, 2);

    // Environment beats file
    env::set_var(ENV_PORT, "7000");
    env::set_var(ENV_DATABASE, "/srv/env.db");
    let config = ServerConfig::from_sources(&ConfigOverrides::default(), &file, &defaults).unwrap();
    assert_eq!(config.port, 7000);
    assert_eq!(config.database_path, PathBuf::from("/srv/env.db"));
    assert_eq!(config.host, "0.0.0.0");

    // CLI beats environment
    let cli = ConfigOverrides {
        port: Some(8000),
        ..Default::default()
    };
    let config = ServerConfig::from_sources(&cli, &file, &defaults).unwrap();
    assert_eq!(config.port, 8000);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_port_is_rejected() {
    clear_env();
    env::set_var(ENV_PORT, "not-a-port");

    let result = ServerConfig::from_sources(
        &ConfigOverrides::default(),
        &TomlConfig::default(),
        &CompiledDefaults::for_current_platform(),
    );
    assert!(result.is_err());

    clear_env();
}

#[test]
#[serial]
fn test_non_positive_ttl_is_rejected() {
    clear_env();
    let file = TomlConfig {
        session_ttl_hours: Some(0),
        ..Default::default()
    };

    let result = ServerConfig::from_sources(
        &ConfigOverrides::default(),
        &file,
        &CompiledDefaults::for_current_platform(),
    );
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_session_ttl_upper_bound() {
    clear_env();
    let resolve = |hours: i64| {
        let file = TomlConfig {
            session_ttl_hours: Some(hours),
            ..Default::default()
        };
        ServerConfig::from_sources(
            &ConfigOverrides::default(),
            &file,
            &CompiledDefaults::for_current_platform(),
        )
    };

    assert!(matches!(resolve(10_000_000_000_000), Err(Error::Config(_))));
    assert!(resolve(MAX_SESSION_TTL_HOURS + 1).is_err());
    assert_eq!(
        resolve(MAX_SESSION_TTL_HOURS).unwrap().session_ttl_hours,
        MAX_SESSION_TTL_HOURS
    );
}

#[test]
fn test_toml_file_parsing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = 5999\ndatabase = \"/tmp/songs.db\"").unwrap();

    let config = TomlConfig::load(file.path()).unwrap();
    assert_eq!(config.port, Some(5999));
    assert_eq!(config.database, Some(PathBuf::from("/tmp/songs.db")));
    assert!(config.host.is_none());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = \"five\"").unwrap();

    let err = TomlConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_resolve_reads_explicit_config_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "host = \"10.0.0.5\"\nport = 6100").unwrap();

    let overrides = ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = ServerConfig::resolve(&overrides).unwrap();
    assert_eq!(config.bind_address(), "10.0.0.5:6100");
}

#[test]
#[serial]
fn test_resolve_survives_broken_config_file() {
    clear_env();
    let overrides = ConfigOverrides {
        config_file: Some(PathBuf::from("/nonexistent/songbook/config.toml")),
        ..Default::default()
    };

    let config = ServerConfig::resolve(&overrides).unwrap();
    assert_eq!(config.port, CompiledDefaults::for_current_platform().port);
}

//! Configuration loading from TOML files and the process environment.

mod support;

use std::io::Write;

use event_portal::config::{AppConfig, CONFIG_PATH_VAR};
use tempfile::NamedTempFile;

const ENV_KEYS: [&str; 4] = ["HOST", "PORT", "RUST_LOG", "REPOSITORY_TYPE"];

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn cleared_env<'a>(extra: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut changes: Vec<(&str, Option<&str>)> = ENV_KEYS.iter().map(|k| (*k, None)).collect();
    changes.push((CONFIG_PATH_VAR, None));
    changes.extend_from_slice(extra);
    changes
}

#[test]
fn test_load_without_file_uses_defaults() {
    support::with_scoped_env(&cleared_env(&[]), || {
        let config = AppConfig::load().unwrap();
        assert_eq!(config, AppConfig::default());
    });
}

#[test]
fn test_load_reads_file_named_by_env() {
    let file = config_file(
        r#"
[server]
host = "127.0.0.1"
port = 3000

[logging]
level = "debug"
"#,
    );
    let path = file.path().to_str().unwrap();
    support::with_scoped_env(&cleared_env(&[(CONFIG_PATH_VAR, Some(path))]), || {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.repository.repo_type, "local");
    });
}

#[test]
fn test_env_overrides_file() {
    let file = config_file("[server]\nport = 3000\n");
    let path = file.path().to_str().unwrap();
    support::with_scoped_env(
        &cleared_env(&[(CONFIG_PATH_VAR, Some(path)), ("PORT", Some("4000"))]),
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.server.port, 4000);
            assert_eq!(config.bind_addr().unwrap().port(), 4000);
        },
    );
}

#[test]
fn test_missing_file_is_an_error() {
    support::with_scoped_env(
        &cleared_env(&[(CONFIG_PATH_VAR, Some("/nonexistent/portal.toml"))]),
        || {
            let err = AppConfig::load().unwrap_err();
            assert!(err.to_string().contains("Failed to read config file"));
        },
    );
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("[server\nport = ");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_unparseable_host_fails_bind_addr() {
    let mut config = AppConfig::default();
    config.server.host = "not a host".to_string();
    assert!(config.bind_addr().is_err());
}

#[test]
fn test_repository_type_comes_from_env_through_config() {
    support::with_scoped_env(&cleared_env(&[("REPOSITORY_TYPE", Some("memory"))]), || {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.repository.repo_type, "memory");
        assert!(event_portal::db::RepositoryFactory::create(&config.repository).is_ok());
    });
}

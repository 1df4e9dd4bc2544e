//! Configuration resolution tests
//!
//! Covers priority order (CLI → ENV → TOML → default) and graceful fallback
//! when the config file is missing or broken.
//!
//! Tests that manipulate READWISE_* environment variables are marked
//! #[serial] so they never run in parallel.

use readwise_common::config::{
    write_toml_config, ClientConfig, ENV_API_URL, ENV_CONFIG_PATH, ENV_SESSION_TOKEN,
};
use serial_test::serial;
use std::env;
use std::io::Write;

fn clear_env() {
    env::remove_var(ENV_API_URL);
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_SESSION_TOKEN);
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let config = ClientConfig::resolve(Some(&missing), None).unwrap();

    assert_eq!(config, ClientConfig::default());
}

#[test]
#[serial]
fn test_toml_file_is_loaded() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api_base_url = \"http://books.internal:9000/\"\nfeed_page_size = 30\nsession_token = \"tok\""
    )
    .unwrap();

    let config = ClientConfig::resolve(Some(file.path()), None).unwrap();

    // trailing slash trimmed so paths can be appended
    assert_eq!(config.api_base_url, "http://books.internal:9000");
    assert_eq!(config.feed_page_size, 30);
    assert_eq!(config.session_token.as_deref(), Some("tok"));
}

#[test]
#[serial]
fn test_broken_toml_falls_back_to_defaults() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_base_url = [not toml").unwrap();

    let config = ClientConfig::resolve(Some(file.path()), None).unwrap();

    assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_base_url = \"http://from-toml:1\"").unwrap();
    env::set_var(ENV_API_URL, "http://from-env:2");
    env::set_var(ENV_SESSION_TOKEN, "env-token");

    let config = ClientConfig::resolve(Some(file.path()), None).unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "http://from-env:2");
    assert_eq!(config.session_token.as_deref(), Some("env-token"));
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_API_URL, "http://from-env:2");

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.toml");
    let config = ClientConfig::resolve(Some(&missing), Some("http://from-cli:3")).unwrap();
    clear_env();

    assert_eq!(config.api_base_url, "http://from-cli:3");
}

#[test]
#[serial]
fn test_env_config_path_is_used() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "search_debounce_ms = 50").unwrap();
    env::set_var(ENV_CONFIG_PATH, file.path());

    let config = ClientConfig::resolve(None, None).unwrap();
    clear_env();

    assert_eq!(config.search_debounce_ms, 50);
}

#[test]
#[serial]
fn test_invalid_value_is_rejected() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "discover_page_size = 0").unwrap();

    let result = ClientConfig::resolve(Some(file.path()), None);

    assert!(result.is_err());
}

#[test]
fn test_write_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = ClientConfig {
        feed_page_size: 20,
        ..Default::default()
    };

    write_toml_config(&config, &path).unwrap();
    let loaded = ClientConfig::load_toml(&path).unwrap();

    assert_eq!(loaded, config);
}

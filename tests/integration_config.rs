// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::time::Duration;

use ssm_loader::config::Config;
use ssm_loader::logging::LogLevel;

fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[scopes]
app_name_var = "SERVICE"
env_var = "STAGE"
env_fallback_var = ""

[store]
page_size = 5
page_delay_ms = 250
region = "eu-central-1"
endpoint = "http://localhost:4566"
timeout_ms = 3000

[log]
level = 4
file = "loader.log"
file_level = 6
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.scopes.app_name_var, "SERVICE");
    assert_eq!(config.scopes.env_fallback_var, "");
    assert_eq!(config.store.page_size, 5);
    assert_eq!(config.store.page_delay(), Duration::from_millis(250));
    assert_eq!(config.store.timeout(), Some(Duration::from_secs(3)));
    assert_eq!(config.store.endpoint.as_deref(), Some("http://localhost:4566"));
    assert_eq!(config.log.level, LogLevel::DEBUG);
    assert_eq!(config.log.file_level, LogLevel::DUMP);
}

#[test]
fn config_parse_partial_keeps_defaults() {
    let config = Config::parse("[store]\nregion = \"us-east-2\"\n").unwrap();

    assert_eq!(config.store.page_size, 10);
    assert_eq!(config.store.page_delay(), Duration::from_millis(100));
    assert_eq!(config.scopes.env_var, "APP_ENV");
    assert_eq!(config.log.level, LogLevel::WARN);
}

#[test]
fn config_rejects_invalid_log_level() {
    let err = Config::parse("[log]\nlevel = 9\n").unwrap_err();
    assert!(format!("{err:#}").contains("9"), "{err:#}");
}

#[test]
fn config_rejects_empty_region() {
    let err = Config::parse("[store]\nregion = \"\"\n").unwrap_err();
    assert!(
        format!("{err:#}").contains("invalid value for 'region' in section '[store]'"),
        "{err:#}"
    );
}

// =============================================================================
// Files and environment
// =============================================================================

#[test]
fn config_files_layer_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_toml(&dir, "base.toml", "[store]\npage_size = 4\npage_delay_ms = 50\n");
    let local = write_toml(&dir, "local.toml", "[store]\npage_size = 8\n");

    let loader = Config::builder()
        .add_toml_file_optional(dir.path().join("absent.toml"))
        .add_toml_file(&base)
        .add_toml_file(&local);
    let files: Vec<_> = loader.loaded_files().iter().map(|f| f.path.clone()).collect();
    assert_eq!(files, vec![base, local]);

    let config = loader.build().unwrap();
    assert_eq!(config.store.page_size, 8);
    assert_eq!(config.store.page_delay_ms, 50);
}

#[test]
fn config_required_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::builder()
        .add_toml_file(dir.path().join("missing.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_env_overrides_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_toml(&dir, "settings.toml", "[store]\npage_size = 4\n");

    // SAFETY: the prefix is unique to this test.
    unsafe {
        std::env::set_var("SSM_LOADER_IT__STORE__PAGE_SIZE", "2");
        std::env::set_var("SSM_LOADER_IT__SCOPES__ENV_VAR", "STAGE");
    }

    let config = Config::builder()
        .add_toml_file(&file)
        .with_env_prefix("SSM_LOADER_IT")
        .build()
        .unwrap();

    assert_eq!(config.store.page_size, 2);
    assert_eq!(config.scopes.env_var, "STAGE");
}

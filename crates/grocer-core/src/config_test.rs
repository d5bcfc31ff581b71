use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.base_url, "https://grocery.walmart.com");
    assert_eq!(cfg.store_id, 915);
    assert_eq!(cfg.page_size, 50);
    assert_eq!(cfg.max_attempts, 10);
    assert_eq!(cfg.retry_backoff_base_ms, 0);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "grocer/0.1 (catalog-export)");
    assert_eq!(cfg.output_dir, Path::new("./output"));
    assert_eq!(cfg.input_path, Path::new("./url_categories.txt"));
    assert_eq!(cfg.pending_path, Path::new("./urls_pending.txt"));
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("GROCER_BASE_URL", "http://127.0.0.1:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("GROCER_BASE_URL", "ftp://example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GROCER_BASE_URL"),
        "expected InvalidEnvVar(GROCER_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    let mut map = HashMap::new();
    map.insert("GROCER_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GROCER_PAGE_SIZE"),
        "expected InvalidEnvVar(GROCER_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_attempts() {
    let mut map = HashMap::new();
    map.insert("GROCER_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GROCER_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(GROCER_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_store_id() {
    let mut map = HashMap::new();
    map.insert("GROCER_STORE_ID", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GROCER_STORE_ID"),
        "expected InvalidEnvVar(GROCER_STORE_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_paths_and_retry_settings() {
    let mut map = HashMap::new();
    map.insert("GROCER_OUTPUT_DIR", "/tmp/grocer-out");
    map.insert("GROCER_INPUT_PATH", "/tmp/urls.txt");
    map.insert("GROCER_PENDING_PATH", "/tmp/pending.txt");
    map.insert("GROCER_MAX_ATTEMPTS", "3");
    map.insert("GROCER_RETRY_BACKOFF_BASE_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_dir, Path::new("/tmp/grocer-out"));
    assert_eq!(cfg.xlsx_dir(), Path::new("/tmp/grocer-out/xlsx"));
    assert_eq!(cfg.images_root(), Path::new("/tmp/grocer-out/images"));
    assert_eq!(cfg.input_path, Path::new("/tmp/urls.txt"));
    assert_eq!(cfg.pending_path, Path::new("/tmp/pending.txt"));
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.retry_backoff_base_ms, 250);
}

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let nonzero = |var: &str, value: u32| -> Result<u32, ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let base_url = or_default("GROCER_BASE_URL", "https://grocery.walmart.com")
        .trim_end_matches('/')
        .to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GROCER_BASE_URL".to_string(),
            reason: format!("\"{base_url}\" is not an http(s) URL"),
        });
    }

    let store_id = parse_u32("GROCER_STORE_ID", "915")?;
    let page_size = nonzero("GROCER_PAGE_SIZE", parse_u32("GROCER_PAGE_SIZE", "50")?)?;
    let max_attempts = nonzero("GROCER_MAX_ATTEMPTS", parse_u32("GROCER_MAX_ATTEMPTS", "10")?)?;
    let retry_backoff_base_ms = parse_u64("GROCER_RETRY_BACKOFF_BASE_MS", "0")?;
    let request_timeout_secs = parse_u64("GROCER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GROCER_USER_AGENT", "grocer/0.1 (catalog-export)");

    let output_dir = PathBuf::from(or_default("GROCER_OUTPUT_DIR", "./output"));
    let input_path = PathBuf::from(or_default("GROCER_INPUT_PATH", "./url_categories.txt"));
    let pending_path = PathBuf::from(or_default("GROCER_PENDING_PATH", "./urls_pending.txt"));
    let log_level = or_default("GROCER_LOG_LEVEL", "info");

    Ok(AppConfig {
        base_url,
        store_id,
        page_size,
        max_attempts,
        retry_backoff_base_ms,
        request_timeout_secs,
        user_agent,
        output_dir,
        input_path,
        pending_path,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

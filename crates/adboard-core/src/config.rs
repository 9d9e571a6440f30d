use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing logic is decoupled from the actual environment so it can be
/// tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let catalog_base_url = or_default("ADBOARD_CATALOG_BASE_URL", "https://dummyjson.com");
    let request_timeout_secs = parse_u64("ADBOARD_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ADBOARD_USER_AGENT", "adboard/0.1 (catalog-browser)");

    let page_size = parse_u32("ADBOARD_PAGE_SIZE", "9")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADBOARD_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }

    let max_retries = parse_u32("ADBOARD_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("ADBOARD_RETRY_BACKOFF_BASE_MS", "500")?;
    let credentials_path = PathBuf::from(or_default(
        "ADBOARD_CREDENTIALS_PATH",
        "./adboard-users.json",
    ));
    let log_level = or_default("ADBOARD_LOG_LEVEL", "info");

    Ok(AppConfig {
        catalog_base_url,
        request_timeout_secs,
        user_agent,
        page_size,
        max_retries,
        retry_backoff_base_ms,
        credentials_path,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

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
    fn empty_environment_yields_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.catalog_base_url, "https://dummyjson.com");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "adboard/0.1 (catalog-browser)");
        assert_eq!(cfg.page_size, 9);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 500);
        assert_eq!(
            cfg.credentials_path,
            PathBuf::from("./adboard-users.json")
        );
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn base_url_override() {
        let mut map = HashMap::new();
        map.insert("ADBOARD_CATALOG_BASE_URL", "http://localhost:8080");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.catalog_base_url, "http://localhost:8080");
    }

    #[test]
    fn page_size_override() {
        let mut map = HashMap::new();
        map.insert("ADBOARD_PAGE_SIZE", "24");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.page_size, 24);
    }

    #[test]
    fn page_size_zero_is_rejected() {
        let mut map = HashMap::new();
        map.insert("ADBOARD_PAGE_SIZE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_PAGE_SIZE"),
            "expected InvalidEnvVar(ADBOARD_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn page_size_invalid_is_rejected() {
        let mut map = HashMap::new();
        map.insert("ADBOARD_PAGE_SIZE", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_PAGE_SIZE"),
            "expected InvalidEnvVar(ADBOARD_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn timeout_invalid_is_rejected() {
        let mut map = HashMap::new();
        map.insert("ADBOARD_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(ADBOARD_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn retry_overrides() {
        let mut map = HashMap::new();
        map.insert("ADBOARD_MAX_RETRIES", "5");
        map.insert("ADBOARD_RETRY_BACKOFF_BASE_MS", "250");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
        assert_eq!(cfg.retry_backoff_base_ms, 250);
    }
}

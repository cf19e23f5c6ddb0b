use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com/maps/search/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

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
/// Every variable has a default, so an empty environment yields a usable
/// config pointed at the public map search endpoint.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let env = parse_environment(&or_default("VETSCAN_ENV", "development"));
    let log_level = or_default("VETSCAN_LOG_LEVEL", "info");

    let search_base_url = or_default("VETSCAN_SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL);
    if !(search_base_url.starts_with("https://") || search_base_url.starts_with("http://")) {
        return Err(invalid(
            "VETSCAN_SEARCH_BASE_URL",
            format!("\"{search_base_url}\" is not an http(s) URL"),
        ));
    }

    let platform_domain = or_default("VETSCAN_PLATFORM_DOMAIN", "google.com")
        .trim()
        .to_ascii_lowercase();
    let platform_brand = or_default("VETSCAN_PLATFORM_BRAND", "google")
        .trim()
        .to_lowercase();
    let user_agent = or_default("VETSCAN_USER_AGENT", DEFAULT_USER_AGENT);

    let viewport_width = parse_u32("VETSCAN_VIEWPORT_WIDTH", "1920")?;
    let viewport_height = parse_u32("VETSCAN_VIEWPORT_HEIGHT", "1080")?;
    let headless = parse_bool("VETSCAN_HEADLESS", "true")?;
    let chrome_executable = lookup("VETSCAN_CHROME_EXECUTABLE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    let feed_timeout_secs = parse_u64("VETSCAN_FEED_TIMEOUT_SECS", "15")?;
    let settle_delay_ms = parse_u64("VETSCAN_SETTLE_DELAY_MS", "2000")?;
    let scroll_settle_ms = parse_u64("VETSCAN_SCROLL_SETTLE_MS", "2000")?;
    let search_timeout_secs = parse_u64("VETSCAN_SEARCH_TIMEOUT_SECS", "120")?;
    if search_timeout_secs == 0 {
        return Err(invalid(
            "VETSCAN_SEARCH_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        search_base_url,
        platform_domain,
        platform_brand,
        user_agent,
        viewport_width,
        viewport_height,
        headless,
        chrome_executable,
        feed_timeout_secs,
        settle_delay_ms,
        scroll_settle_ms,
        search_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

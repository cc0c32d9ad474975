use crate::app_config::{AppConfig, Environment};
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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PRICEWATCH_ENV", "development"))?;
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("PRICEWATCH_REQUEST_TIMEOUT_SECS", "20")?;
    let connect_timeout_secs = parse_u64("PRICEWATCH_CONNECT_TIMEOUT_SECS", "10")?;
    let resolve_deadline_secs = parse_u64("PRICEWATCH_RESOLVE_DEADLINE_SECS", "60")?;
    let captcha_pause_ms = parse_u64("PRICEWATCH_CAPTCHA_PAUSE_MS", "600")?;
    let max_concurrent_resolves = parse_usize("PRICEWATCH_MAX_CONCURRENT_RESOLVES", "3")?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        resolve_deadline_secs,
        captcha_pause_ms,
        max_concurrent_resolves,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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
/// development config. Decoupled from the real environment so tests can
/// drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("RINGDESIGN_ENV", "development"))?;
    let bind_addr = parse_addr("RINGDESIGN_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("RINGDESIGN_LOG_LEVEL", "info");
    let allowed_origin = optional("RINGDESIGN_ALLOWED_ORIGIN");
    let vendors_path = optional("RINGDESIGN_VENDORS_PATH").map(PathBuf::from);

    let fetch_timeout_secs = parse_u64("RINGDESIGN_FETCH_TIMEOUT_SECS", "20")?;
    let user_agent = or_default("RINGDESIGN_USER_AGENT", DEFAULT_USER_AGENT);
    let min_body_chars = parse_usize("RINGDESIGN_MIN_BODY_CHARS", "1000")?;
    let min_image_dimension = parse_u32("RINGDESIGN_MIN_IMAGE_DIMENSION", "300")?;
    let max_images = parse_usize("RINGDESIGN_MAX_IMAGES", "10")?;
    let rate_limit_per_minute = parse_usize("RINGDESIGN_RATE_LIMIT_PER_MINUTE", "30")?;

    if fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "RINGDESIGN_FETCH_TIMEOUT_SECS must be greater than zero".to_string(),
        ));
    }
    if max_images == 0 {
        return Err(ConfigError::Validation(
            "RINGDESIGN_MAX_IMAGES must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        allowed_origin,
        vendors_path,
        fetch_timeout_secs,
        user_agent,
        min_body_chars,
        min_image_dimension,
        max_images,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RINGDESIGN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Characters left unescaped in the userinfo part of a connection URL.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let database_url = resolve_database_url(&lookup)?;

    let env = parse_environment(&or_default("SCHOOLDB_ENV", "development"));

    let bind_addr = match lookup("SCHOOLDB_BIND_ADDR") {
        Ok(raw) => raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "SCHOOLDB_BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?,
        Err(_) => {
            let port = or_default("PORT", "8888")
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "PORT".to_string(),
                    reason: e.to_string(),
                })?;
            SocketAddr::from(([0, 0, 0, 0], port))
        }
    };

    let log_level = or_default("SCHOOLDB_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("SCHOOLDB_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SCHOOLDB_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SCHOOLDB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let store_timeout_secs = parse_u64("SCHOOLDB_STORE_TIMEOUT_SECS", "5")?;

    if store_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SCHOOLDB_STORE_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        store_timeout_secs,
    })
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the discrete
/// `DB_HOST` / `DB_USER` / `DB_PASS` / `DB_NAME` / `DB_PORT` variables.
fn resolve_database_url<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    if let Ok(url) = lookup("DATABASE_URL") {
        return Ok(url);
    }

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let host = require("DB_HOST")?;
    let user = require("DB_USER")?;
    let name = require("DB_NAME")?;
    let password = lookup("DB_PASS").ok().filter(|p| !p.is_empty());
    let port = lookup("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    port.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
        var: "DB_PORT".to_string(),
        reason: e.to_string(),
    })?;

    let user = utf8_percent_encode(&user, USERINFO);
    let userinfo = match password {
        Some(p) => format!("{user}:{}", utf8_percent_encode(&p, USERINFO)),
        None => user.to_string(),
    };

    Ok(format!("postgres://{userinfo}@{host}:{port}/{name}"))
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

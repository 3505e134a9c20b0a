//! Process configuration, read from the environment exactly once.
//!
//! Everything configurable is collected into an [`AppConfig`] value at
//! startup. The value is immutable; handlers and middleware read settings
//! through [`crate::state::app_state::AppState`], never from the environment.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::state::security_config::SecurityConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must be {1}")]
    Invalid(&'static str, &'static str),
}

/// Startup settings for the API process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Environment variables must be set by the runtime environment:
    /// - Docker: Set via docker-compose env_file or docker run --env-file
    /// - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("TASKDECK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("TASKDECK_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("TASKDECK_PORT", "a valid port number"))?;

        let secret = must_var("TASKDECK_JWT_SECRET")?;
        let ttl_secs = env::var("TASKDECK_ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "900".to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::Invalid("TASKDECK_ACCESS_TOKEN_TTL_SECS", "a number of seconds")
            })?;

        let security = SecurityConfig::new(secret.as_bytes())
            .with_access_token_ttl(Duration::from_secs(ttl_secs));

        Ok(Self {
            host,
            port,
            security,
        })
    }
}

/// Get required environment variable or return error. An empty value counts
/// as unset.
fn must_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

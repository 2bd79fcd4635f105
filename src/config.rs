use std::{env, net::SocketAddr};

use chrono::Duration;
use thiserror::Error;

use crate::token::{SecretError, TokenConfig, TokenSecret, DEFAULT_VALIDITY_SECONDS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error(transparent)]
    Secret(#[from] SecretError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub frontend_origin: String,
    pub bind_addr: SocketAddr,
    pub token: TokenConfig,
    pub auth_rate_limit_seconds: u64,
    pub auth_rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let frontend_origin =
            lookup("FRONTEND_ORIGIN").ok_or(ConfigError::Missing("FRONTEND_ORIGIN"))?;

        let secret = TokenSecret::new(lookup("TOKEN_SECRET").unwrap_or_default())?;
        let validity_seconds: i64 =
            parse_or(&lookup, "TOKEN_VALIDITY_SECONDS", DEFAULT_VALIDITY_SECONDS)?;
        if validity_seconds <= 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_VALIDITY_SECONDS",
                value: validity_seconds.to_string(),
            });
        }

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: raw,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        Ok(Config {
            database_url,
            frontend_origin,
            bind_addr,
            token: TokenConfig::new(secret)
                .with_validity_window(Duration::seconds(validity_seconds)),
            auth_rate_limit_seconds: parse_or(&lookup, "RATE_LIMITER_AUTH_SECONDS", 1)?,
            auth_rate_limit_burst: parse_or(&lookup, "RATE_LIMITER_AUTH_BURST", 10)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

//! # Service Configuration
//!
//! Settings come from the process environment. A `.env` file in the
//! working directory is loaded first if present.
//!
//! | Variable | Default |
//! |---|---|
//! | `PG_HOST` | `localhost` |
//! | `PG_PORT` | `5432` |
//! | `PG_USER` | `postgres` |
//! | `PG_PASSWORD` | empty |
//! | `PG_DATABASE` | `vopapier` |
//! | `PG_SSL_VERIFY` | `false` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `CORS_ORIGINS` | empty (any origin) |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_FORMAT` | `pretty` |

use std::fmt;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::logging::LoggingConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// PostgreSQL connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Verify the server certificate. When off, TLS is still required but
    /// the certificate is not checked.
    pub ssl_verify: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "vopapier".to_string(),
            ssl_verify: false,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("ssl_verify", &self.ssl_verify)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn ssl_mode(&self) -> PgSslMode {
        if self.ssl_verify {
            PgSslMode::VerifyFull
        } else {
            PgSslMode::Require
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(self.ssl_mode())
    }

    /// Open the process-wide pool with driver defaults
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .connect_with(self.connect_options())
            .await
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub database: DatabaseConfig,
    pub http: HttpServerConfig,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load from `.env` (if any) and the process environment
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or empty variables
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = ServiceConfig::default();

        let database = DatabaseConfig {
            host: get("PG_HOST").unwrap_or(defaults.database.host),
            port: match get("PG_PORT") {
                Some(raw) => parse_port("PG_PORT", &raw)?,
                None => defaults.database.port,
            },
            user: get("PG_USER").unwrap_or(defaults.database.user),
            password: lookup("PG_PASSWORD").unwrap_or(defaults.database.password),
            database: get("PG_DATABASE").unwrap_or(defaults.database.database),
            ssl_verify: match get("PG_SSL_VERIFY") {
                Some(raw) => parse_bool("PG_SSL_VERIFY", &raw)?,
                None => defaults.database.ssl_verify,
            },
        };

        let http = HttpServerConfig {
            host: get("HOST").unwrap_or(defaults.http.host),
            port: match get("PORT") {
                Some(raw) => parse_port("PORT", &raw)?,
                None => defaults.http.port,
            },
            cors_origins: get("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.http.cors_origins),
        };

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or(defaults.logging.level),
            format: match get("LOG_FORMAT") {
                Some(raw) => parse_log_format(&raw)?,
                None => defaults.logging.format,
            },
        };

        Ok(Self {
            database,
            http,
            logging,
        })
    }
}

fn parse_port(var: &'static str, raw: &str) -> ConfigResult<u16> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(var: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_log_format(raw: &str) -> ConfigResult<String> {
    match raw.trim() {
        "pretty" | "json" => Ok(raw.trim().to_string()),
        _ => Err(ConfigError::InvalidValue {
            var: "LOG_FORMAT",
            value: raw.to_string(),
            reason: "expected pretty or json".to_string(),
        }),
    }
}

//! Runtime configuration read from the environment (and `.env` via dotenvy).

use std::env;
use std::net::SocketAddr;

use chrono::Duration;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::ValidationRules;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub mail: MailSettings,
    pub pagination: PaginationSettings,
    pub validation: ValidationRules,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub confirmation_code_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub default_from_email: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PaginationSettings {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl AuthSettings {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            token_ttl: Duration::hours(24),
            confirmation_code_ttl: Duration::hours(24),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            AppError::ConfigError("DATABASE_URL environment variable not found".to_string())
        })?;

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            AppError::ConfigError("JWT_SECRET environment variable not found".to_string())
        })?;
        if jwt_secret.len() < 32 {
            return Err(AppError::ConfigError(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::ConfigError(format!("Invalid BIND_ADDR: {}", e)))?;

        let pagination = PaginationSettings {
            default_limit: parse_var("PAGE_SIZE", 20)?,
            max_limit: parse_var("MAX_PAGE_SIZE", 100)?,
        };

        Ok(Self {
            bind_addr,
            database: DatabaseSettings {
                url: database_url,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            auth: AuthSettings {
                jwt_secret,
                token_ttl: Duration::hours(parse_var("JWT_TTL_HOURS", 24)?),
                confirmation_code_ttl: Duration::hours(parse_var(
                    "CONFIRMATION_CODE_TTL_HOURS",
                    24,
                )?),
            },
            mail: MailSettings {
                default_from_email: env::var("DEFAULT_FROM_EMAIL")
                    .unwrap_or_else(|_| "noreply@critiq.local".to_string()),
            },
            pagination,
            validation: ValidationRules::default(),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

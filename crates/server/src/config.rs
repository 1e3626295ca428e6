//! Application configuration

use std::env;

/// Seconds a session token remains valid (1 hour)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    /// Origin allowed by CORS (the consuming frontend)
    pub frontend_origin: String,

    // Database
    pub database_url: String,

    // Authentication
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    /// The signing secret has no default in any environment: a missing or
    /// weak `JWT_SECRET` is a startup-time fatal error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            jwt_secret: {
                let secret =
                    env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
                if secret.len() < 32 {
                    return Err(ConfigError::WeakSecret(
                        "JWT_SECRET must be at least 32 characters",
                    ));
                }
                secret
            },
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Weak secret: {0}")]
    WeakSecret(&'static str),
}

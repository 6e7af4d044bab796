/**
 * Server Configuration
 *
 * This module loads server configuration from the environment.
 *
 * # Configuration Sources
 *
 * | Variable | Default | Meaning |
 * |---|---|---|
 * | `JWT_SECRET` | (required) | Session token signing secret |
 * | `JWT_EXPIRATION_MINUTES` | `60` | Session token lifetime |
 * | `CACHE_TTL_SECONDS` | `300` | Directory cache entry lifetime |
 * | `SERVER_PORT` | `3000` | Listen port |
 * | `CORS_ALLOWED_ORIGINS` | localhost dev origins | Comma-separated list |
 * | `DATABASE_URL` | (optional) | PostgreSQL connection string |
 *
 * # Error Handling
 *
 * A missing or empty `JWT_SECRET` is fatal: tokens signed with a guessable
 * default would be forgeable, so startup refuses instead. Everything else
 * degrades: a missing or unreachable database is logged and the server
 * falls back to the in-memory store.
 */

use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

/// Fatal configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set or empty; refusing to start without a signing secret")]
    MissingJwtSecret,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Session token signing secret; never logged
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Directory cache entry lifetime
    pub cache_ttl: Duration,
    /// Listen port
    pub port: u16,
    /// Origins permitted by the CORS policy
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingJwtSecret`] when `JWT_SECRET` is unset or
    /// empty. This aborts startup; it is not a per-request condition.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let token_minutes = read_env_number("JWT_EXPIRATION_MINUTES", 60);
        let cache_seconds = read_env_number("CACHE_TTL_SECONDS", 300);
        let port = read_env_number("SERVER_PORT", 3000u16);

        let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:4200".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::from_secs(token_minutes * 60),
            cache_ttl: Duration::from_secs(cache_seconds),
            port,
            allowed_origins,
        })
    }
}

/// Read a numeric environment variable, falling back on the default for
/// unset or unparsable values.
fn read_env_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Load and initialize the database connection pool
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Returns `None` when
/// the variable is unset or the connection fails; the caller decides what
/// to fall back to.
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; database features disabled");
            return None;
        }
    };

    tracing::info!("connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("failed to create database connection pool: {:?}", e);
            tracing::warn!("database features disabled");
            return None;
        }
    };

    tracing::info!("database connection pool created");

    tracing::info!("running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("database migrations completed"),
        Err(e) => {
            // Migrations may already be applied by an earlier deployment.
            tracing::error!("failed to run database migrations: {:?}", e);
            tracing::warn!("continuing without migrations; schema may be out of date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "JWT_SECRET",
            "JWT_EXPIRATION_MINUTES",
            "CACHE_TTL_SECONDS",
            "SERVER_PORT",
            "CORS_ALLOWED_ORIGINS",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_fatal() {
        clear_env();
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingJwtSecret)));

        std::env::set_var("JWT_SECRET", "");
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingJwtSecret)));
    }

    #[test]
    #[serial]
    fn test_defaults_apply() {
        clear_env();
        std::env::set_var("JWT_SECRET", "unit-test-secret");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.port, 3000);
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    #[serial]
    fn test_overrides_apply() {
        clear_env();
        std::env::set_var("JWT_SECRET", "unit-test-secret");
        std::env::set_var("JWT_EXPIRATION_MINUTES", "15");
        std::env::set_var("CACHE_TTL_SECONDS", "30");
        std::env::set_var("SERVER_PORT", "8080");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://app.example.com");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(900));
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            vec!["https://app.example.com".to_string()]
        );

        clear_env();
    }
}

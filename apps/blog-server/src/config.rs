//! Application configuration loaded from environment variables.

use std::env;

use actix_web::cookie::Key;
use quill_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    session_secret: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            session_secret: env::var("SESSION_SECRET").ok(),
        }
    }

    /// Key used to sign session cookies.
    ///
    /// `SESSION_SECRET` must be at least 64 bytes; anything shorter (or
    /// absent) falls back to an ephemeral key, which invalidates all sessions
    /// on restart.
    pub fn session_key(&self) -> Key {
        match self.session_secret.as_deref() {
            Some(secret) if secret.len() >= 64 => Key::derive_from(secret.as_bytes()),
            Some(_) => {
                tracing::error!(
                    "SESSION_SECRET is shorter than 64 bytes; using an ephemeral session key"
                );
                Key::generate()
            }
            None => {
                let is_production = env::var("RUST_ENV")
                    .map(|v| v == "production" || v == "prod")
                    .unwrap_or(false);

                if is_production {
                    tracing::error!(
                        "SECURITY: No SESSION_SECRET set in production! Sessions will not survive restarts."
                    );
                } else {
                    tracing::warn!("Using an ephemeral session key. Set SESSION_SECRET for production use.");
                }
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: Option<&str>) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            session_secret: secret.map(str::to_string),
        }
    }

    #[test]
    fn long_secret_derives_a_stable_key() {
        let secret = "s".repeat(64);
        let a = config_with_secret(Some(&secret)).session_key();
        let b = config_with_secret(Some(&secret)).session_key();
        assert_eq!(a.master(), b.master());
    }

    #[test]
    fn short_or_missing_secret_yields_ephemeral_keys() {
        let a = config_with_secret(Some("too-short")).session_key();
        let b = config_with_secret(Some("too-short")).session_key();
        assert_ne!(a.master(), b.master());

        let c = config_with_secret(None).session_key();
        let d = config_with_secret(None).session_key();
        assert_ne!(c.master(), d.master());
    }
}

//! Environment configuration

use tracing::warn;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub db: DbConfig,
}

/// PostgreSQL connection parameters.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub user: String,
    pub host: String,
    pub name: String,
    pub password: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from environment variables, applying defaults
    /// where a variable is unset. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honored.
    pub fn from_env() -> Self {
        let server_port = env_u16("PORT", 3001);

        let user = std::env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
        let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let name = std::env::var("DB_NAME").unwrap_or_else(|_| "booklog".to_string());
        let password = std::env::var("DB_PASSWORD").unwrap_or_else(|_| {
            warn!("DB_PASSWORD not set, using empty password");
            String::new()
        });
        let port = env_u16("DB_PORT", 5432);

        Self {
            server_port,
            db: DbConfig {
                user,
                host,
                name,
                password,
                port,
            },
        }
    }
}

fn env_u16(key: &str, default: u16) -> u16 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid port number ({}), using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

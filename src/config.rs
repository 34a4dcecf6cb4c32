//! Runtime settings shared by the server and the migration tools.
//! Read from the environment (after `.env`), falling back to the built-in defaults.

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::path::PathBuf;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USERNAME: &str = "root";
pub const DEFAULT_DB_PASSWORD: &str = "secret";
pub const DEFAULT_DB_NAME: &str = "nextcrm";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MIGRATIONS_DIR: &str = "sql/migrations";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.into(),
            port: DEFAULT_DB_PORT,
            username: DEFAULT_DB_USERNAME.into(),
            password: DEFAULT_DB_PASSWORD.into(),
            name: DEFAULT_DB_NAME.into(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseSettings {
    /// Connection options equivalent to `host=.. port=.. user=.. password=.. dbname=.. sslmode=disable`.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }

    /// `host:port/dbname`, safe to log.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub server_address: String,
    pub database: DatabaseSettings,
    pub migrations_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.into(),
            database: DatabaseSettings::default(),
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
        }
    }
}

impl Settings {
    /// Load from process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let db = defaults.database;
        Ok(Settings {
            server_address: lookup("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            database: DatabaseSettings {
                host: lookup("DB_HOST").unwrap_or(db.host),
                port: parse_or(&lookup, "DB_PORT", db.port)?,
                username: lookup("DB_USERNAME").unwrap_or(db.username),
                password: lookup("DB_PASSWORD").unwrap_or(db.password),
                name: lookup("DB_NAME").unwrap_or(db.name),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", db.max_connections)?,
            },
            migrations_dir: lookup("MIGRATIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.migrations_dir),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

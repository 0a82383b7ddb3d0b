//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;

use crate::cache::PRODUCT_CACHE_TTL;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown {kind} backend '{value}'")]
    UnknownBackend { kind: &'static str, value: String },

    #[error("invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(String),
}

/// Reads `name` and parses it, treating unparseable values as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}

// == Backends ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Redis,
}

impl FromStr for CacheBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(ConfigError::UnknownBackend {
                kind: "cache",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    MySql,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mysql" => Ok(Self::MySql),
            _ => Err(ConfigError::UnknownBackend {
                kind: "store",
                value: s.to_string(),
            }),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    pub cache_backend: CacheBackend,
    pub store_backend: StoreBackend,
    /// Lifetime of cached products in seconds
    pub cache_ttl: u64,
    /// Capacity of the in-memory cache
    pub cache_max_entries: usize,
    /// Interval in seconds between in-memory cache sweeps
    pub cleanup_interval: u64,
    pub redis_url: String,
    /// Full MySQL URL; takes precedence over the `db_*` fields
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    /// Passed to the driver as is, never spliced into a URL
    pub db_password: Option<String>,
    pub db_name: String,
    pub db_max_connections: u32,
    /// JSON catalogue for the in-memory store
    pub products_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `STORE_BACKEND` - `memory` or `mysql` (default: memory)
    /// - `CACHE_TTL` - Cached product lifetime in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 60)
    /// - `REDIS_URL`, or `REDIS_HOST` / `REDIS_PORT` (default: localhost:6379)
    /// - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`
    ///   (default: root@localhost:3306/products)
    /// - `DB_MAX_CONNECTIONS` - MySQL pool size (default: 10)
    /// - `PRODUCTS_FILE` - JSON catalogue for the in-memory store
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache_backend = match lookup("CACHE_BACKEND") {
            Some(v) => v.parse()?,
            None => defaults.cache_backend,
        };
        let store_backend = match lookup("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => defaults.store_backend,
        };

        let redis_url = lookup("REDIS_URL").unwrap_or_else(|| {
            format!(
                "redis://{}:{}",
                lookup("REDIS_HOST").unwrap_or_else(|| "localhost".to_string()),
                lookup("REDIS_PORT").unwrap_or_else(|| "6379".to_string()),
            )
        });

        Ok(Self {
            server_port: parse_var(&lookup, "PORT").unwrap_or(defaults.server_port),
            cache_backend,
            store_backend,
            cache_ttl: parse_var(&lookup, "CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_max_entries: parse_var(&lookup, "CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            redis_url,
            database_url: lookup("DATABASE_URL"),
            db_host: lookup("DB_HOST").unwrap_or(defaults.db_host),
            db_port: parse_var(&lookup, "DB_PORT").unwrap_or(defaults.db_port),
            db_user: lookup("DB_USER").unwrap_or(defaults.db_user),
            db_password: lookup("DB_PASSWORD"),
            db_name: lookup("DB_NAME").unwrap_or(defaults.db_name),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            products_file: lookup("PRODUCTS_FILE").map(PathBuf::from),
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }

    /// Connection options for the MySQL store.
    ///
    /// `DATABASE_URL` is parsed when set. Otherwise the options are built
    /// field by field, so credentials need no URL encoding.
    pub fn mysql_options(&self) -> Result<MySqlConnectOptions, ConfigError> {
        if let Some(url) = &self.database_url {
            return url
                .parse::<MySqlConnectOptions>()
                .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()));
        }

        let options = MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);
        Ok(match &self.db_password {
            Some(password) => options.password(password),
            None => options,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_backend: CacheBackend::Memory,
            store_backend: StoreBackend::Memory,
            cache_ttl: PRODUCT_CACHE_TTL.as_secs(),
            cache_max_entries: 10_000,
            cleanup_interval: 60,
            redis_url: "redis://localhost:6379".to_string(),
            database_url: None,
            db_host: "localhost".to_string(),
            db_port: 3306,
            db_user: "root".to_string(),
            db_password: None,
            db_name: "products".to_string(),
            db_max_connections: 10,
            products_file: None,
        }
    }
}

//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQLite busy timeout, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    /// Log every SQL statement.
    #[serde(default)]
    pub echo: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "xavier_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "xavier.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    xavier_db::DbRuntimeSettings::default().busy_timeout_ms
}

fn default_pool_max_size() -> u32 {
    xavier_db::DbRuntimeSettings::default().pool_max_size
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
            echo: false,
        }
    }
}

impl DatabaseConfig {
    /// Returns the pool tunables described by this section.
    pub fn runtime_settings(&self) -> xavier_db::DbRuntimeSettings {
        xavier_db::DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
            echo: self.echo,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `XAVIER_HOST` overrides `server.host`
/// - `XAVIER_PORT` overrides `server.port`
/// - `XAVIER_DB_PATH` overrides `database.path`
/// - `XAVIER_DB_BUSY_TIMEOUT_MS` overrides `database.busy_timeout_ms`
/// - `XAVIER_DB_POOL_MAX_SIZE` overrides `database.pool_max_size`
/// - `XAVIER_DB_ECHO` overrides `database.echo` (set to "true" to enable)
/// - `XAVIER_LOG_LEVEL` overrides `logging.level`
/// - `XAVIER_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Applies overrides from `lookup`, which maps a variable name to its value.
///
/// Values that fail to parse are logged and ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    override_parsed(&lookup, "XAVIER_HOST", &mut config.server.host);
    override_parsed(&lookup, "XAVIER_PORT", &mut config.server.port);
    if let Some(db_path) = lookup("XAVIER_DB_PATH") {
        config.database.path = db_path;
    }
    override_parsed(
        &lookup,
        "XAVIER_DB_BUSY_TIMEOUT_MS",
        &mut config.database.busy_timeout_ms,
    );
    override_parsed(
        &lookup,
        "XAVIER_DB_POOL_MAX_SIZE",
        &mut config.database.pool_max_size,
    );
    if let Some(echo) = lookup("XAVIER_DB_ECHO") {
        config.database.echo = is_truthy(&echo);
    }
    if let Some(level) = lookup("XAVIER_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("XAVIER_LOG_JSON") {
        config.logging.json = is_truthy(&json);
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => tracing::warn!(key, value = %raw, "ignoring unparsable override"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

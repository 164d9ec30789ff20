//! Configuration management
//!
//! Everything comes from the environment (with `.env` support via dotenvy).
//! Only the knobs this service actually reads are modeled; anything unset
//! falls back to a local-development default.

use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/catalog";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Read an env var and parse it, falling back when unset or malformed
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_string("CATALOG_HOST", DEFAULT_HOST),
            port: env_parse("CATALOG_PORT", DEFAULT_PORT),
            shutdown_timeout_secs: env_parse(
                "CATALOG_SHUTDOWN_TIMEOUT",
                DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            ),
        }
    }
}

/// Connection pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    fn from_env() -> Self {
        Self {
            url: env_string("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            min_connections: env_parse("DATABASE_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS),
            connect_timeout_secs: env_parse(
                "DATABASE_CONNECT_TIMEOUT",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
            idle_timeout_secs: env_parse("DATABASE_IDLE_TIMEOUT", DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

/// CORS settings; origins are a comma-separated list, `*` allows any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    fn from_env() -> Self {
        Self {
            allowed_origins: env_string("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGIN)
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            allow_credentials: env_parse("CORS_ALLOW_CREDENTIALS", true),
        }
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cors: CorsConfig::from_env(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                min_connections: DEFAULT_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}

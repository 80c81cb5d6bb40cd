//! Configuration module
//!
//! Reads the service configuration from a TOML file
//! (`~/.config/users-service/config.toml` by default). Every field has a
//! default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::ConfigError;

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("users-service")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub users: UsersConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests during shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
    /// Create the `users` table at start-up when it does not exist
    pub ensure_schema: bool,
    pub pool: PoolConfig,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./users.db?mode=rwc".to_string(),
            ensure_schema: true,
            pool: PoolConfig::default(),
        }
    }
}

/// Connection pool sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// User-management policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Only addresses on this domain may register
    pub allowed_email_domain: String,
    /// Include password hashes in `GET /users`
    pub expose_password_hash: bool,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            allowed_email_domain: "gmail.com".to_string(),
            expose_password_hash: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let domain = self.users.allowed_email_domain.trim();
        if domain.is_empty() || domain.contains('@') {
            return Err(ConfigError::Invalid(format!(
                "users.allowed_email_domain must be a bare domain, got '{}'",
                self.users.allowed_email_domain
            )));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost must be between 4 and 31, got {}",
                self.security.bcrypt_cost
            )));
        }
        if self.database.pool.max_connections == 0
            || self.database.pool.min_connections > self.database.pool.max_connections
        {
            return Err(ConfigError::Invalid(
                "database.pool: need 0 < min_connections <= max_connections".to_string(),
            ));
        }
        Ok(())
    }
}

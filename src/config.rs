//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/extreme-park/config.toml`,
//! overridable with `PARK_CONFIG`), then patched from environment variables:
//!
//! | Variable              | Field                  |
//! |-----------------------|------------------------|
//! | `ADMIN_PASSWORD_HASH` | `admin.password_hash`  |
//! | `DATABASE_URL`        | `database.url`         |
//! | `PARK_HOST`           | `server.host`          |
//! | `PARK_PORT`           | `server.port`          |
//!
//! A missing file is not an error; a missing admin hash is, and it is
//! reported by [`AppConfig::validate`] before the server binds anything.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::crypto::password::is_bcrypt_hash;
use crate::infrastructure::DatabaseConfig;

pub const ADMIN_HASH_ENV: &str = "ADMIN_PASSWORD_HASH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("admin password hash is not configured (set {ADMIN_HASH_ENV} or [admin].password_hash)")]
    MissingAdminHash,

    #[error("admin password hash is not a valid bcrypt hash")]
    InvalidAdminHash,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for cleanup after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. `info` or `park_booking=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
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

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// bcrypt hash of the admin password (see `park-cli hash-password`)
    pub password_hash: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not
    /// exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Patch fields from a variable lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(hash) = lookup(ADMIN_HASH_ENV) {
            self.admin.password_hash = Some(hash);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = lookup("PARK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PARK_PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidValue {
                field: "PARK_PORT",
                reason: format!("{}", e),
            })?;
        }
        Ok(())
    }

    /// Startup checks. The admin hash must be present and well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hash = self
            .admin
            .password_hash
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingAdminHash)?;
        if !is_bcrypt_hash(hash) {
            return Err(ConfigError::InvalidAdminHash);
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }
}

/// `~/.config/extreme-park/config.toml`, or `./config.toml` when the platform
/// has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("extreme-park").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

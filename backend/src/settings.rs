//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HABITS_*` environment variables or a config
//! file, in OrthoConfig's usual precedence. The struct is loaded once in
//! `main` and handed to the server builder.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("HABITS_DATABASE_URL is required")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr { value: String },
    #[error("HABITS_DB_MAX_CONNECTIONS must be at least 1")]
    ZeroPoolSize,
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HABITS")]
pub struct AppSettings {
    /// Socket address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Inline HS256 secret for verifying access tokens.
    pub jwt_secret: Option<String>,
    /// File holding the HS256 secret; takes precedence over `jwt_secret`.
    pub jwt_secret_file: Option<PathBuf>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Parsed bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections {
            Some(0) => Err(SettingsError::ZeroPoolSize),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_DB_MAX_CONNECTIONS),
        }
    }

    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret.as_deref()
    }

    pub fn jwt_secret_file(&self) -> Option<&Path> {
        self.jwt_secret_file.as_deref()
    }
}

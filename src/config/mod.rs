//! Configuration Module
//!
//! Centralized configuration management for the booking service. Everything
//! is read once from the environment in `main` and passed down explicitly;
//! there is no global configuration state.

use crate::database::DatabaseConfig;

/// Environment variable helpers
pub mod env {
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u32 with default
    pub fn get_u32(key: &str, default: u32) -> u32 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u64 with default
    pub fn get_u64(key: &str, default: u64) -> u64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as usize with default
    pub fn get_usize(key: &str, default: usize) -> usize {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as i64 with default
    pub fn get_i64(key: &str, default: i64) -> i64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get required environment variable or panic
    pub fn get_required(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Required environment variable {} is not set", key))
    }
}

/// Application configuration combining all service configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Attachment storage configuration
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_days: i64,
}

/// Attachment storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory uploaded files are written into
    pub upload_dir: String,

    /// URL prefix the upload directory is served from
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::get_string("SERVER_HOST", "0.0.0.0"),
            port: env::get_u16("SERVER_PORT", 5000),
            // Uploads ride in the request body, so leave them headroom.
            max_request_size: env::get_usize("MAX_REQUEST_SIZE", 10 * 1024 * 1024),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: env::get_required("JWT_SECRET"),
            expires_days: env::get_i64("JWT_EXPIRES_DAYS", 7),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: env::get_string("UPLOAD_DIR", "uploads"),
            public_base_url: env::get_string("UPLOAD_BASE_URL", "/uploads"),
        }
    }
}

impl AppConfig {
    /// Load complete application configuration from environment
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::default(),
            storage: StorageConfig::default(),
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        // Validate server configuration
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".into());
        }

        // Validate database configuration
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".into());
        }

        if self.database.min_connections > self.database.max_connections {
            return Err("Database min_connections cannot be greater than max_connections".into());
        }

        // Validate JWT configuration
        if self.jwt.secret.is_empty() {
            return Err("JWT secret cannot be empty".into());
        }

        if self.jwt.expires_days <= 0 {
            return Err("JWT expiry must be at least one day".into());
        }

        // Validate storage configuration
        if self.storage.upload_dir.is_empty() {
            return Err("Upload directory cannot be empty".into());
        }

        if !self.storage.public_base_url.starts_with('/') {
            return Err("Upload base URL must start with /".into());
        }

        // The router cannot nest the upload service at the bare root or at
        // a path with a trailing slash.
        if self.storage.public_base_url.ends_with('/') {
            return Err("Upload base URL must not be / or end with /".into());
        }

        Ok(())
    }
}

//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upload store configuration
    pub uploads: UploadConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Upload store configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory where uploaded product images are persisted
    pub dir: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3001),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            uploads: UploadConfig {
                dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

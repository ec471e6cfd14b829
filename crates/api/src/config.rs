//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Carehive
//! scheduling API. It retrieves configuration values from environment variables
//! and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `SHIFT_SERVICE_URL`: Base URL of the scheduling backend (required unless
//!   `USE_IN_MEMORY_SERVICE` is set)
//! - `DIRECTORY_SERVICE_URL`: Base URL of the agency directory (default: the
//!   shift service URL)
//! - `SERVICE_API_KEY`: Bearer token sent to both services
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Timeout for incoming and outgoing requests
//! - `USE_IN_MEMORY_SERVICE`: Serve from an in-process backend for local runs

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Where the scheduler reads and writes shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Hosted scheduling and directory services
    Remote {
        shift_service_url: String,
        directory_url: String,
        api_key: Option<String>,
    },
    /// In-process store seeded with one admin, for local development
    InMemory { admin_id: String, agency_id: String },
}

/// Configuration for the Carehive API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    pub backend: Backend,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

fn parse_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `SHIFT_SERVICE_URL` is not set and the in-memory backend is not enabled
    /// - The API_PORT value cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Backend settings
        let in_memory = env::var("USE_IN_MEMORY_SERVICE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let backend = if in_memory {
            Backend::InMemory {
                admin_id: env::var("DEV_ADMIN_ID").unwrap_or_else(|_| "dev-admin".to_string()),
                agency_id: env::var("DEV_AGENCY_ID").unwrap_or_else(|_| "dev-agency".to_string()),
            }
        } else {
            let shift_service_url = env::var("SHIFT_SERVICE_URL")
                .wrap_err("SHIFT_SERVICE_URL environment variable must be set")?;
            let directory_url =
                env::var("DIRECTORY_SERVICE_URL").unwrap_or_else(|_| shift_service_url.clone());
            Backend::Remote {
                shift_service_url,
                directory_url,
                api_key: env::var("SERVICE_API_KEY").ok(),
            }
        };

        // Logging settings
        let log_level = parse_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            backend,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

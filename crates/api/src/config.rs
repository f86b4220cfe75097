//! Server configuration for the Coursebook API.
//!
//! This module provides configuration types for the API server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COURSEBOOK_SERVER_PORT` | 8080 | Server port |
//! | `COURSEBOOK_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `COURSEBOOK_LOG_LEVEL` | info | Log level |
//! | `COURSEBOOK_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `COURSEBOOK_ENABLE_CORS` | true | Enable CORS |
//! | `COURSEBOOK_CORS_ORIGINS` | * | Allowed origins |
//! | `COURSEBOOK_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `COURSEBOOK_CORS_HEADERS` | Content-Type,Accept,If-None-Match | Allowed headers |
//! | `COURSEBOOK_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `COURSEBOOK_ENABLE_REQUEST_ID` | true | Enable request ID tracking |
//! | `COURSEBOOK_DEFAULT_PAGE_SIZE` | 10 | Default page size |
//! | `COURSEBOOK_MAX_PAGE_SIZE` | 20 | Maximum page size |
//! | `COURSEBOOK_CACHE_MAX_AGE` | 60 | Default cache max-age (seconds) |
//! | `COURSEBOOK_CACHE_LOCATION` | private | Default cache location |
//! | `COURSEBOOK_CACHE_MUST_REVALIDATE` | true | Emit must-revalidate |
//! | `COURSEBOOK_VALIDATOR_CACHE_CAPACITY` | 1024 | Validator store capacity |
//!
//! # Example
//!
//! ```rust
//! use coursebook_api::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

use crate::cache::{CacheDirectives, CacheLocation};

/// Server configuration for the Coursebook API.
///
/// This struct can be constructed from environment variables using
/// [`ServerConfig::from_env`], from command line arguments using
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "coursebook")]
#[command(about = "Coursebook REST API Server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "COURSEBOOK_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "COURSEBOOK_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "COURSEBOOK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "COURSEBOOK_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "COURSEBOOK_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "COURSEBOOK_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "COURSEBOOK_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "COURSEBOOK_CORS_HEADERS",
        default_value = "Content-Type,Accept,If-None-Match,X-Request-ID"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in pagination links).
    #[arg(
        long,
        env = "COURSEBOOK_BASE_URL",
        default_value = "http://localhost:8080"
    )]
    pub base_url: String,

    /// Enable request ID tracking.
    #[arg(long, env = "COURSEBOOK_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// Default page size for list results.
    #[arg(long, env = "COURSEBOOK_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Maximum page size for list results.
    #[arg(long, env = "COURSEBOOK_MAX_PAGE_SIZE", default_value = "20")]
    pub max_page_size: usize,

    /// Default cache max-age in seconds.
    ///
    /// Parsed as a signed value so a negative configuration is rejected at
    /// startup by [`ServerConfig::validate`] instead of wrapping silently.
    #[arg(long, env = "COURSEBOOK_CACHE_MAX_AGE", default_value = "60")]
    pub cache_max_age: i64,

    /// Default cache location (private or public).
    #[arg(long, env = "COURSEBOOK_CACHE_LOCATION", default_value = "private")]
    pub cache_location: String,

    /// Emit must-revalidate in Cache-Control.
    #[arg(long, env = "COURSEBOOK_CACHE_MUST_REVALIDATE", default_value = "true")]
    pub cache_must_revalidate: bool,

    /// Maximum number of validator entries retained in memory.
    #[arg(
        long,
        env = "COURSEBOOK_VALIDATOR_CACHE_CAPACITY",
        default_value = "1024"
    )]
    pub validator_cache_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept,If-None-Match,X-Request-ID".to_string(),
            base_url: "http://localhost:8080".to_string(),
            enable_request_id: true,
            default_page_size: 10,
            max_page_size: 20,
            cache_max_age: 60,
            cache_location: "private".to_string(),
            cache_must_revalidate: true,
            validator_cache_capacity: 1024,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.cache_max_age < 0 {
            errors.push("Cache max-age cannot be negative".to_string());
        }

        if CacheLocation::parse(&self.cache_location).is_none() {
            errors.push(format!(
                "Unknown cache location '{}' (expected 'private' or 'public')",
                self.cache_location
            ));
        }

        if self.validator_cache_capacity == 0 {
            errors.push("Validator cache capacity cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the default cache directives from configuration.
    ///
    /// Call [`ServerConfig::validate`] first; this falls back to `private`
    /// when the configured location string does not parse.
    pub fn default_cache_directives(&self) -> CacheDirectives {
        let location = CacheLocation::parse(&self.cache_location).unwrap_or(CacheLocation::Private);
        let directives =
            CacheDirectives::new(self.cache_max_age.max(0) as u32, location);
        if self.cache_must_revalidate {
            directives.with_must_revalidate()
        } else {
            directives
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            enable_request_id: false,
            default_page_size: 10,
            max_page_size: 20,
            cache_max_age: 60,
            cache_location: "private".to_string(),
            cache_must_revalidate: true,
            validator_cache_capacity: 64,
        }
    }
}

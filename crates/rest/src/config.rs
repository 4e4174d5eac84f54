//! Server configuration for the HTTP API.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VERDANT_PORT` | 8080 | Server port |
//! | `VERDANT_HOST` | 127.0.0.1 | Host to bind |
//! | `VERDANT_LOG_LEVEL` | info | Log level |
//! | `VERDANT_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `VERDANT_ENABLE_CORS` | true | Enable CORS |
//! | `VERDANT_CORS_ORIGINS` | * | Allowed origins |
//! | `VERDANT_DATABASE_URL` | verdant.db | SQLite path, or `:memory:` |
//! | `VERDANT_DEFAULT_PAGE_SIZE` | 20 | Page size when `limit` is omitted |
//! | `VERDANT_MAX_PAGE_SIZE` | 100 | Larger `limit` values are clamped |
//!
//! # Example
//!
//! ```rust
//! use verdant_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use clap::Parser;
use verdant_persistence::PaginationConfig;

/// Server configuration for the HTTP API.
///
/// Built from command line arguments and environment variables with
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "verdant")]
#[command(about = "Verdant plant watering tracker API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "VERDANT_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "VERDANT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "VERDANT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "VERDANT_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "VERDANT_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "VERDANT_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// SQLite database path, or `:memory:`.
    #[arg(long, env = "VERDANT_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Page size used when a request omits `limit`.
    #[arg(long, env = "VERDANT_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: usize,

    /// Maximum page size. Larger requests are clamped.
    #[arg(long, env = "VERDANT_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let pagination = PaginationConfig::default();
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            database_url: None,
            default_page_size: pagination.default_page_size,
            max_page_size: pagination.max_page_size,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the database path, defaulting to `verdant.db`.
    pub fn database_path(&self) -> &str {
        self.database_url.as_deref().unwrap_or("verdant.db")
    }

    /// Page-size limits for the listings.
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new(self.default_page_size, self.max_page_size)
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

        if let Err(pagination_errors) = self.pagination().validate() {
            errors.extend(pagination_errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, an in-memory database and small pages.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            database_url: Some(":memory:".to_string()),
            default_page_size: 10,
            max_page_size: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.database_path(), "verdant.db");
    }

    #[test]
    fn test_parse_from_args() {
        let config = ServerConfig::try_parse_from([
            "verdant",
            "--port",
            "9000",
            "--database-url",
            ":memory:",
            "--max-page-size",
            "500",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path(), ":memory:");
        assert_eq!(config.pagination().max_page_size, 500);
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_page_sizes() {
        let config = ServerConfig {
            default_page_size: 100,
            max_page_size: 50,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("page size")));
    }

    #[test]
    fn test_pagination_limits() {
        let pagination = ServerConfig::for_testing().pagination();
        assert_eq!(pagination.resolve_limit(None).unwrap(), 10);
        assert_eq!(pagination.resolve_limit(Some(1000)).unwrap(), 50);
    }
}

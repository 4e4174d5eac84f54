//! # verdant-rest - HTTP API for the Verdant watering tracker
//!
//! This crate exposes the plant, watering-task and plan-history listings
//! over HTTP with opaque keyset cursors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdant_rest::{create_app, ServerConfig};
//! use verdant_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("verdant.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | URL Pattern | Description |
//! |--------|-------------|-------------|
//! | GET | `/plants` | List plants (`sort`, `order`, `q`, `species`) |
//! | POST | `/plants` | Create a plant |
//! | GET | `/watering-tasks` | List tasks (`sort`, `order`, `status`, `source`, `plant_id`, `due_from`, `due_to`) |
//! | POST | `/watering-tasks` | Create a task |
//! | GET | `/plants/{plant_id}/watering-plans` | A plant's plan history (`sort`, `order`) |
//! | POST | `/plants/{plant_id}/watering-plans` | Record a plan version |
//! | GET | `/health` | Health check |
//!
//! Every listing also accepts `limit` and `cursor`, and answers with
//! `{"data": [...], "page": {"limit", "hasNext", "nextCursor"}}`. Pass
//! `nextCursor` back unchanged, with the same sort and filters, to fetch
//! the next page.
//!
//! ## HTTP Headers
//!
//! - `X-User-ID` - The requesting user. Required; requests without it get 401.
//!
//! ## Error Handling
//!
//! Errors are JSON `{"error": {"code", "message"}}`:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | invalid_cursor | Cursor is malformed or was minted for another user, sort or filter set |
//! | 400 | invalid_request | Unknown sort field, bad filter value, zero limit |
//! | 401 | unauthorized | Missing `X-User-ID` |
//! | 404 | not_found | Plant not found |
//! | 500 | internal | Storage failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their JSON rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Owner and pagination extractors
//! - [`responses`] - The listing envelope
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use verdant_persistence::VerdantStorage;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: VerdantStorage + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use verdant_rest::{create_app_with_config, ServerConfig};
/// use verdant_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let config = ServerConfig {
///     max_page_size: 50,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: VerdantStorage + 'static,
{
    info!(
        backend = storage.backend_name(),
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Creating API server"
    );

    let state = AppState::new(Arc::new(storage), config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "verdant={level},verdant_rest={level},verdant_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

//! Application state for the HTTP API.
//!
//! Holds the storage backend and configuration shared by every handler.

use std::sync::Arc;

use verdant_persistence::{PaginationConfig, VerdantStorage};

use crate::config::ServerConfig;

/// Shared application state for the HTTP API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`VerdantStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use verdant_rest::{AppState, ServerConfig};
/// use verdant_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Page-size limits, resolved once from the configuration.
    pagination: PaginationConfig,
}

// S is behind an Arc and need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            pagination: self.pagination,
        }
    }
}

impl<S: VerdantStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let pagination = config.pagination();
        Self {
            storage,
            config: Arc::new(config),
            pagination,
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the page-size limits.
    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }
}

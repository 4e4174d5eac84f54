//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates cursor errors, validation errors,
//! resource state errors and backend errors.
//!
//! Cursor failures deliberately collapse into a single user-facing kind,
//! [`InvalidCursor`]. The specific [`CursorRejection`] is kept for logging
//! and tests but is never part of the rendered message.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Pagination cursor errors
    #[error(transparent)]
    Cursor(#[from] InvalidCursor),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns `true` if this error is an invalid pagination cursor.
    pub fn is_invalid_cursor(&self) -> bool {
        matches!(self, StorageError::Cursor(_))
    }
}

/// A pagination cursor that cannot be used for the current request.
///
/// The message is intentionally generic: it does not say whether the token
/// was malformed, minted by another owner, or minted under another sort or
/// filter set. Callers must restart pagination from the first page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("pagination cursor is invalid or expired")]
pub struct InvalidCursor {
    reason: CursorRejection,
}

impl InvalidCursor {
    /// Creates an invalid-cursor error with the given internal reason.
    pub fn new(reason: CursorRejection) -> Self {
        Self { reason }
    }

    /// Returns the internal reason. For diagnostics only.
    pub fn reason(&self) -> &CursorRejection {
        &self.reason
    }
}

impl From<CursorRejection> for InvalidCursor {
    fn from(reason: CursorRejection) -> Self {
        Self::new(reason)
    }
}

/// Why a cursor was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorRejection {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64url")]
    Encoding,

    #[error("cursor checksum does not match its payload")]
    Checksum,

    #[error("cursor payload is not valid JSON")]
    Json,

    #[error("cursor payload has an invalid shape: {message}")]
    Shape { message: String },

    #[error("unsupported cursor version {found}, expected {expected}")]
    UnsupportedVersion { found: u64, expected: u32 },

    #[error("cursor sort value is not in the canonical form of its field")]
    SortValue,

    #[error("cursor was issued to a different owner")]
    OwnerMismatch,

    #[error("cursor was issued for a different sort field or order")]
    SortMismatch,

    #[error("cursor was issued under different filters")]
    FilterMismatch,
}

/// Errors related to request and record validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The requested page size is not acceptable.
    #[error("invalid page size {requested}: must be between 1 and {max}")]
    InvalidPageSize { requested: usize, max: usize },

    /// A filter parameter is invalid.
    #[error("invalid filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    /// Missing required field.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field has an invalid value.
    #[error("invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },
}

/// Errors related to record state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The requested record was not found for this owner.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// A record with the given ID already exists.
    #[error("{resource} already exists: {id}")]
    AlreadyExists { resource: String, id: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for cursor decoding and validation.
pub type CursorResult<T> = Result<T, InvalidCursor>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

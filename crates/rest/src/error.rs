//! Error types for the HTTP API.
//!
//! Every error renders as a JSON body `{"error": {"code", "message"}}`.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Code |
//! |--------------|-------------|------|
//! | InvalidCursor | 400 | invalid_cursor |
//! | Validation | 400 | invalid_request |
//! | NotFound | 404 | not_found |
//! | AlreadyExists | 409 | conflict |
//! | Backend | 500 | internal |
//!
//! Cursor rejections always carry the same message. The internal reason is
//! logged at debug level and never returned to the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use verdant_persistence::error::{ResourceError, StorageError, ValidationError};

/// Client-facing message for every rejected cursor.
pub const INVALID_CURSOR_MESSAGE: &str = "cursor is invalid or expired";

/// The primary error type for HTTP API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The pagination cursor cannot be used for this request (HTTP 400).
    #[error("{INVALID_CURSOR_MESSAGE}")]
    InvalidCursor,

    /// Malformed parameters or body (HTTP 400).
    #[error("{message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// No requesting user could be identified (HTTP 401).
    #[error("{message}")]
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Record not found (HTTP 404).
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// Kind of record.
        resource: String,
        /// Record id.
        id: String,
    },

    /// Record already exists (HTTP 409).
    #[error("{resource} '{id}' already exists")]
    Conflict {
        /// Kind of record.
        resource: String,
        /// Record id.
        id: String,
    },

    /// Storage is not reachable (HTTP 503).
    #[error("{message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500). The detail is logged, not returned.
    #[error("internal server error")]
    InternalError {
        /// Error detail for the log.
        message: String,
    },
}

impl RestError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::InvalidCursor | RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::InvalidCursor => "invalid_cursor",
            RestError::BadRequest { .. } => "invalid_request",
            RestError::Unauthorized { .. } => "unauthorized",
            RestError::NotFound { .. } => "not_found",
            RestError::Conflict { .. } => "conflict",
            RestError::ServiceUnavailable { .. } => "unavailable",
            RestError::InternalError { .. } => "internal",
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::InternalError { message } = &self {
            error!(error = %message, "Request failed");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Cursor(e) => {
                debug!(reason = %e.reason(), "Rejected pagination cursor");
                RestError::InvalidCursor
            }
            StorageError::Validation(e) => e.into(),
            StorageError::Resource(ResourceError::NotFound { resource, id }) => {
                RestError::NotFound { resource, id }
            }
            StorageError::Resource(ResourceError::AlreadyExists { resource, id }) => {
                RestError::Conflict { resource, id }
            }
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<QueryRejection> for RestError {
    fn from(rejection: QueryRejection) -> Self {
        RestError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Result type for HTTP API operations.
pub type RestResult<T> = Result<T, RestError>;

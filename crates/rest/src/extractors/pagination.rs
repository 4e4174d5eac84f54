//! Pagination extractor.
//!
//! Extracts the `limit` and `cursor` query parameters shared by every listing.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use verdant_persistence::VerdantStorage;

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor for pagination parameters.
///
/// The page size is resolved against the server's limits: omitted means the
/// default, larger than the maximum is clamped, and zero is rejected.
///
/// # Example
///
/// ```rust,ignore
/// use verdant_rest::extractors::Pagination;
///
/// async fn list_handler(pagination: Pagination) {
///     let limit = pagination.limit();
///     let cursor = pagination.cursor();
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Resolved page size.
    limit: usize,
    /// Opaque continuation token from the previous page.
    cursor: Option<String>,
}

/// Query parameters for pagination.
#[derive(Debug, Deserialize)]
struct PaginationQuery {
    limit: Option<usize>,
    cursor: Option<String>,
}

impl Pagination {
    /// Creates a new Pagination with the given values.
    pub fn new(limit: usize, cursor: Option<String>) -> Self {
        Self { limit, cursor }
    }

    /// Returns the page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the cursor, if the request continues a listing.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

impl<S> FromRequestParts<AppState<S>> for Pagination
where
    S: VerdantStorage + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::try_from_uri(&parts.uri)?;

        let limit = state.pagination().resolve_limit(query.limit)?;

        Ok(Pagination::new(limit, query.cursor))
    }
}

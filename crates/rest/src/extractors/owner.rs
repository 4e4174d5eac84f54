//! Requesting-user extractor.
//!
//! Every listing is scoped to the user named by the `X-User-ID` header.
//! Authentication happens upstream; this service trusts the header.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::HeaderName, request::Parts},
};
use verdant_persistence::owner::OwnerId;

use crate::error::RestError;

/// Header carrying the requesting user's id.
pub static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Axum extractor for the requesting user.
///
/// Rejects the request with 401 when the header is missing, blank or not
/// valid UTF-8.
///
/// # Example
///
/// ```rust,ignore
/// use verdant_rest::extractors::OwnerExtractor;
///
/// async fn handler(owner: OwnerExtractor) {
///     println!("Owner: {}", owner.owner_id());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OwnerExtractor {
    owner: OwnerId,
}

impl OwnerExtractor {
    /// Creates an extractor for the given user id.
    pub fn new(owner_id: &str) -> Self {
        Self {
            owner: OwnerId::new(owner_id),
        }
    }

    /// Returns the owner.
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the owner id as a string.
    pub fn owner_id(&self) -> &str {
        self.owner.as_str()
    }

    /// Consumes the extractor and returns the owner.
    pub fn into_owner(self) -> OwnerId {
        self.owner
    }
}

impl std::fmt::Display for OwnerExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.owner_id())
    }
}

/// Reads a non-blank user id from headers.
fn extract_owner_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&X_USER_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
}

impl<S> FromRequestParts<S> for OwnerExtractor
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner_id =
            extract_owner_id_from_headers(&parts.headers).ok_or_else(|| RestError::Unauthorized {
                message: format!("missing {} header", X_USER_ID.as_str()),
            })?;

        Ok(OwnerExtractor::new(&owner_id))
    }
}

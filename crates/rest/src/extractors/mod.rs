//! Axum extractors shared by the handlers.
//!
//! - [`OwnerExtractor`] - The requesting user, from `X-User-ID`
//! - [`Pagination`] - The `limit` and `cursor` query parameters

mod owner;
mod pagination;

pub use owner::{OwnerExtractor, X_USER_ID};
pub use pagination::Pagination;

//! Row fetching for paginated listings.

use async_trait::async_trait;

use crate::cursor::Paginated;
use crate::error::StorageResult;
use crate::owner::OwnerId;
use crate::types::PageQuery;

/// Storage capability the pagination engine consumes.
///
/// An implementation returns at most `query.limit` rows of listing `R` that
/// belong to `owner` and satisfy `query.predicate`, ordered by
/// `query.order_by`. It must not apply any ordering or filtering of its own
/// beyond the owner scope.
///
/// # Example
///
/// ```ignore
/// use verdant_persistence::core::RowSource;
/// use verdant_persistence::cursor::{ListRequest, paginate};
/// use verdant_persistence::resources::Plants;
///
/// async fn first_page<S: RowSource<Plants>>(source: &S, request: &ListRequest<Plants>) {
///     let page = paginate(source, request, None).await.unwrap();
///     println!("{} plants, more: {}", page.len(), page.page_info.has_next);
/// }
/// ```
#[async_trait]
pub trait RowSource<R: Paginated>: Send + Sync {
    /// Fetches rows of `R` for one page query.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - If the query cannot be executed
    async fn fetch(&self, owner: &OwnerId, query: &PageQuery) -> StorageResult<Vec<R::Row>>;
}

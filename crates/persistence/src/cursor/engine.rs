//! Request-level entry points of the pagination engine.

use tracing::debug;

use super::predicate::Keyset;
use super::{FilterSnapshot, ListRequest, Paginated, SortKey, assemble_page, codec, validate};
use crate::core::RowSource;
use crate::error::{CursorResult, StorageResult};
use crate::types::{ID_COLUMN, OrderBy, Page, PageQuery, Predicate};

/// Builds the storage query for one page.
///
/// Without a cursor this is the first page: only the listing's filters
/// apply. With a cursor, the token is decoded and bound to the request
/// context, and its keyset clause is ANDed with the filters.
///
/// The query fetches `limit + 1` rows ordered by the sort column, then by
/// id, both in the requested direction.
pub fn build_page<R: Paginated>(
    request: &ListRequest<R>,
    cursor: Option<&str>,
) -> CursorResult<PageQuery> {
    let mut clauses = request.filters().predicates();

    if let Some(token) = cursor {
        let payload = codec::decode(token)
            .and_then(|payload| validate(&payload, request).map(|()| payload))
            .inspect_err(|e| {
                debug!(
                    resource = R::RESOURCE,
                    owner = %request.owner(),
                    reason = %e.reason(),
                    "Rejected pagination cursor"
                );
            })?;

        clauses.push(Keyset::from_cursor(&payload).to_predicate());
    }

    let sort = request.sort();
    Ok(PageQuery {
        predicate: Predicate::all(clauses),
        order_by: [
            OrderBy {
                column: sort.field.column(),
                order: sort.order,
            },
            OrderBy {
                column: ID_COLUMN,
                order: sort.order,
            },
        ],
        limit: request.limit().saturating_add(1),
    })
}

/// Lists one page: builds the query, fetches from `source` and assembles
/// the result.
///
/// An invalid cursor fails before storage is queried.
pub async fn paginate<R, S>(
    source: &S,
    request: &ListRequest<R>,
    cursor: Option<&str>,
) -> StorageResult<Page<R::Row>>
where
    R: Paginated,
    S: RowSource<R> + ?Sized,
{
    let query = build_page(request, cursor)?;

    debug!(
        resource = R::RESOURCE,
        owner = %request.owner(),
        sort = ?request.sort(),
        limit = request.limit(),
        resumed = cursor.is_some(),
        "Fetching page"
    );

    let rows = source.fetch(request.owner(), &query).await?;
    assemble_page(rows, request)
}

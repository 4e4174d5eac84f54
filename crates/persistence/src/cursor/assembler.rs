//! Turning a fetched batch into a page.

use super::payload::CursorPayload;
use super::{ListRequest, Paginated, codec};
use crate::error::StorageResult;
use crate::types::{Page, PageInfo};

/// Assembles a page from a batch fetched with `limit + 1` rows.
///
/// If the batch holds more than `limit` rows, the extra rows are dropped and
/// the next cursor is minted from the last retained row. A batch of `limit`
/// rows or fewer, including an empty one, is the final page.
pub fn assemble_page<R: Paginated>(
    mut rows: Vec<R::Row>,
    request: &ListRequest<R>,
) -> StorageResult<Page<R::Row>> {
    let limit = request.limit();

    if rows.len() <= limit {
        return Ok(Page::new(rows, PageInfo::end()));
    }

    rows.truncate(limit);

    let page_info = match rows.last() {
        Some(boundary) => {
            let cursor = CursorPayload::boundary(request, boundary);
            PageInfo::with_next(codec::encode(&cursor)?)
        }
        None => PageInfo::end(),
    };

    Ok(Page::new(rows, page_info))
}

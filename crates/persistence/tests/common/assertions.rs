//! Assertion helpers for paginated listings.

use verdant_persistence::cursor::{ListRequest, Paginated, paginate};
use verdant_persistence::error::{CursorRejection, StorageError};
use verdant_persistence::RowSource;

/// Upper bound on pages walked before a traversal is considered stuck.
const MAX_PAGES: usize = 1000;

/// Walks every page of `request`, returning the record ids page by page.
pub async fn collect_pages<R, S>(source: &S, request: &ListRequest<R>) -> Vec<Vec<String>>
where
    R: Paginated,
    S: RowSource<R>,
{
    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = paginate(source, request, cursor.as_deref())
            .await
            .expect("Failed to fetch page");

        assert_eq!(page.page_info.has_next, page.page_info.next_cursor.is_some());
        assert!(page.len() <= request.limit(), "page exceeds limit");

        pages.push(page.items.iter().map(|row| R::record_id(row).to_string()).collect());

        match page.page_info.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
        assert!(pages.len() < MAX_PAGES, "traversal did not terminate");
    }

    pages
}

/// Walks every page of `request`, returning all record ids in order.
pub async fn collect_ids<R, S>(source: &S, request: &ListRequest<R>) -> Vec<String>
where
    R: Paginated,
    S: RowSource<R>,
{
    collect_pages(source, request).await.concat()
}

/// Asserts that `err` is an invalid-cursor rejection and returns the reason.
pub fn assert_invalid_cursor(err: StorageError) -> CursorRejection {
    match err {
        StorageError::Cursor(invalid) => invalid.reason().clone(),
        other => panic!("Expected InvalidCursor, got {:?}", other),
    }
}

//! The paginated listing envelope.

use serde::Serialize;
use verdant_persistence::Page;

/// One page of a listing.
///
/// ```json
/// { "data": [...], "page": { "limit": 20, "hasNext": true, "nextCursor": "..." } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    /// The rows of this page.
    pub data: Vec<T>,
    /// Continuation metadata.
    pub page: PageMeta,
}

/// Continuation metadata for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// The page size the request was served with.
    pub limit: usize,
    /// Whether another page follows.
    pub has_next: bool,
    /// Token for the next page; `null` on the last page.
    pub next_cursor: Option<String>,
}

impl<T> ListResponse<T> {
    /// Wraps a page served with `limit`.
    pub fn from_page(page: Page<T>, limit: usize) -> Self {
        Self {
            data: page.items,
            page: PageMeta {
                limit,
                has_next: page.page_info.has_next,
                next_cursor: page.page_info.next_cursor,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verdant_persistence::PageInfo;

    #[test]
    fn test_last_page_serializes_null_cursor() {
        let response = ListResponse::from_page(Page::new(vec![1, 2], PageInfo::end()), 5);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "data": [1, 2],
                "page": { "limit": 5, "hasNext": false, "nextCursor": null }
            })
        );
    }

    #[test]
    fn test_page_with_next() {
        let page = Page::new(vec!["a"], PageInfo::with_next("tok".to_string()));
        let response = ListResponse::from_page(page, 1);

        assert!(response.page.has_next);
        assert_eq!(response.page.next_cursor.as_deref(), Some("tok"));
    }
}

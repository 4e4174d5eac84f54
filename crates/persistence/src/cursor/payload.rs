//! The data carried inside a cursor token.

use serde::{Deserialize, Serialize};

use super::codec::CURSOR_VERSION;
use super::{FilterSnapshot, ListRequest, Paginated, SortKey};
use crate::owner::OwnerId;
use crate::types::{Sort, SortOrder};

/// The boundary of a page, plus the context it was minted under.
///
/// Field order is the canonical JSON field order. Unset filters are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CursorPayload<S, F> {
    /// Payload schema version.
    pub version: u32,

    /// The owner the listing was produced for.
    pub owner_id: OwnerId,

    /// The field the listing was sorted by.
    pub sort_field: S,

    /// The direction the listing was sorted in.
    pub sort_order: SortOrder,

    /// Canonical string form of the boundary row's sort value.
    pub sort_value: String,

    /// Id of the boundary row.
    pub record_id: String,

    /// Filters in effect when the cursor was minted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters_snapshot: Option<F>,
}

/// The cursor payload type of a listing.
pub type CursorOf<R> = CursorPayload<<R as Paginated>::SortField, <R as Paginated>::Filters>;

impl<S: SortKey, F: FilterSnapshot> CursorPayload<S, F> {
    /// Creates a payload at the current version.
    pub fn new(
        owner_id: OwnerId,
        sort: Sort<S>,
        sort_value: impl Into<String>,
        record_id: impl Into<String>,
        filters_snapshot: Option<F>,
    ) -> Self {
        Self {
            version: CURSOR_VERSION,
            owner_id,
            sort_field: sort.field,
            sort_order: sort.order,
            sort_value: sort_value.into(),
            record_id: record_id.into(),
            filters_snapshot,
        }
    }

    /// Captures `row` as the boundary of a page produced for `request`.
    pub fn boundary<R>(request: &ListRequest<R>, row: &R::Row) -> Self
    where
        R: Paginated<SortField = S, Filters = F>,
    {
        let sort = request.sort();
        Self::new(
            request.owner().clone(),
            sort,
            R::sort_value(row, sort.field),
            R::record_id(row),
            request.filters_snapshot().cloned(),
        )
    }

    /// The sort this cursor was minted under.
    pub fn sort(&self) -> Sort<S> {
        Sort::new(self.sort_field, self.sort_order)
    }
}

//! Opaque keyset-pagination cursors.
//!
//! One generic engine serves every paginated listing. A listing is described
//! by a type implementing [`Paginated`]: its closed set of sortable fields,
//! its filter-snapshot type and how to read `(sort value, id)` off a row.
//!
//! The per-request lifecycle is:
//!
//! 1. [`build_page`] decodes the optional cursor token ([`codec`]), checks it
//!    against the request's owner, sort and filters ([`validate()`]), and turns
//!    it into a "strictly after the boundary row" predicate ([`Keyset`]),
//!    ANDed with the listing's own filters.
//! 2. The caller fetches up to `limit + 1` rows with the returned
//!    [`PageQuery`](crate::types::PageQuery).
//! 3. [`assemble_page`] trims the extra row and mints the next cursor from
//!    the last retained row.
//!
//! [`paginate`] runs all three steps against a [`RowSource`](crate::core::RowSource).
//!
//! # Example
//!
//! ```
//! use verdant_persistence::cursor::{ListRequest, build_page};
//! use verdant_persistence::owner::OwnerId;
//! use verdant_persistence::resources::{PlantFilters, PlantSortField, Plants};
//! use verdant_persistence::types::Sort;
//!
//! let request = ListRequest::<Plants>::new(
//!     OwnerId::new("user-1"),
//!     Sort::desc(PlantSortField::CreatedAt),
//!     PlantFilters::default(),
//!     20,
//! )
//! .unwrap();
//!
//! // First page: no cursor, no keyset clause, fetch one extra row.
//! let query = build_page(&request, None).unwrap();
//! assert!(query.predicate.is_none());
//! assert_eq!(query.limit, 21);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;
use crate::owner::OwnerId;
use crate::types::{Predicate, Sort, SortValueKind};

mod assembler;
pub mod codec;
mod engine;
mod payload;
mod predicate;
mod validate;

pub use assembler::assemble_page;
pub use codec::{CURSOR_VERSION, MAX_CURSOR_TOKEN_LEN};
pub use engine::{build_page, paginate};
pub use payload::{CursorOf, CursorPayload};
pub use predicate::Keyset;
pub use validate::validate;

/// A closed set of sortable columns for one listing.
pub trait SortKey:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The storage column this field sorts by.
    fn column(self) -> &'static str;

    /// The canonical form of this field's sort values. Cursors whose
    /// `sortValue` is not in this form are rejected.
    fn value_kind(self) -> SortValueKind;
}

/// The filter parameters of one listing, snapshotted into cursors.
///
/// Snapshots are compared structurally, so implementations should
/// normalize their values on construction (trim text, drop blanks).
pub trait FilterSnapshot:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Returns `true` when no filter is set. Unset filters are omitted from
    /// the cursor entirely.
    fn is_unset(&self) -> bool;

    /// The independent filter clauses this snapshot applies to the listing.
    fn predicates(&self) -> Vec<Predicate>;

    /// Rejects combinations of values that cannot be queried.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Filter snapshot of a listing without filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct NoFilters;

impl FilterSnapshot for NoFilters {
    fn is_unset(&self) -> bool {
        true
    }

    fn predicates(&self) -> Vec<Predicate> {
        Vec::new()
    }
}

/// A listing that can be paginated with keyset cursors.
pub trait Paginated: Send + Sync + 'static {
    /// Short name used in logs and errors.
    const RESOURCE: &'static str;

    /// The sortable fields.
    type SortField: SortKey;

    /// The filter snapshot type.
    type Filters: FilterSnapshot;

    /// The row type returned by storage.
    type Row: Send + Sync;

    /// Sort applied when the request names none.
    fn default_sort() -> Sort<Self::SortField>;

    /// Canonical string form of the row's value for `field`.
    ///
    /// Byte-wise order of these strings must agree with the storage order
    /// of the column.
    fn sort_value(row: &Self::Row, field: Self::SortField) -> String;

    /// The row's unique id, used as the tie-breaker.
    fn record_id(row: &Self::Row) -> &str;
}

/// The context of one list request: who asks, in what order, under which
/// filters, and how many rows per page.
#[derive(Debug, Clone)]
pub struct ListRequest<R: Paginated> {
    owner: OwnerId,
    sort: Sort<R::SortField>,
    filters: R::Filters,
    limit: usize,
}

impl<R: Paginated> ListRequest<R> {
    /// Creates a validated list request.
    ///
    /// Fails when `limit` is zero or the filters are inconsistent.
    pub fn new(
        owner: OwnerId,
        sort: Sort<R::SortField>,
        filters: R::Filters,
        limit: usize,
    ) -> Result<Self, ValidationError> {
        if limit == 0 {
            return Err(ValidationError::InvalidPageSize {
                requested: 0,
                max: usize::MAX,
            });
        }
        if owner.is_blank() {
            return Err(ValidationError::MissingRequiredField {
                field: "owner".to_string(),
            });
        }
        filters.validate()?;

        Ok(Self {
            owner,
            sort,
            filters,
            limit,
        })
    }

    /// The requesting owner.
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// The requested sort.
    pub fn sort(&self) -> Sort<R::SortField> {
        self.sort
    }

    /// The requested filters.
    pub fn filters(&self) -> &R::Filters {
        &self.filters
    }

    /// The filter snapshot bound into cursors: `None` when no filter is set.
    pub fn filters_snapshot(&self) -> Option<&R::Filters> {
        if self.filters.is_unset() {
            None
        } else {
            Some(&self.filters)
        }
    }

    /// Page size.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

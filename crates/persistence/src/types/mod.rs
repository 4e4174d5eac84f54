//! Core types for the persistence layer.
//!
//! - [`Page`], [`PageInfo`], [`Sort`], [`SortOrder`] - Pagination types
//! - [`PageQuery`], [`Predicate`], [`OrderBy`] - What a storage backend executes
//!
//! # Examples
//!
//! ```
//! use verdant_persistence::types::{Predicate, SortOrder};
//!
//! // "due on or after May 1st, and still pending"
//! let filter = Predicate::all(vec![
//!     Predicate::gte("due_on", "2024-05-01"),
//!     Predicate::eq("status", "pending"),
//! ]);
//! assert!(filter.is_some());
//! assert_eq!(SortOrder::default(), SortOrder::Asc);
//! ```

mod pagination;
mod query;

pub use pagination::{
    Page, PageInfo, Sort, SortOrder, SortValueKind, date_sort_value, is_sortable_date,
    timestamp_sort_value,
};
pub use query::{
    ColumnValues, CompareOp, Condition, FilterValue, ID_COLUMN, OWNER_COLUMN, OrderBy, PageQuery,
    Predicate,
};

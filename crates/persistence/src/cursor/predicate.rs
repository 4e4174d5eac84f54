//! Keyset ("seek") predicates.

use super::payload::CursorPayload;
use super::SortKey;
use crate::types::{CompareOp, ID_COLUMN, Predicate, SortOrder};

/// A resume point: everything strictly after `(sort_value, record_id)` in
/// the listing's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyset {
    /// Sort column.
    pub column: &'static str,
    /// Listing direction.
    pub order: SortOrder,
    /// Boundary row's sort value.
    pub sort_value: String,
    /// Boundary row's id.
    pub record_id: String,
}

impl Keyset {
    /// The resume point encoded in a (validated) cursor.
    pub fn from_cursor<S: SortKey, F>(cursor: &CursorPayload<S, F>) -> Self {
        Self {
            column: cursor.sort_field.column(),
            order: cursor.sort_order,
            sort_value: cursor.sort_value.clone(),
            record_id: cursor.record_id.clone(),
        }
    }

    /// Builds the storage predicate.
    ///
    /// Ascending:
    ///
    /// ```text
    /// (col > sort_value) OR (col = sort_value AND id > record_id)
    /// ```
    ///
    /// Descending uses `<` in both places.
    pub fn to_predicate(&self) -> Predicate {
        let op = CompareOp::strictly_after(self.order);

        Predicate::Or(vec![
            Predicate::cmp_op(self.column, op, self.sort_value.as_str()),
            Predicate::And(vec![
                Predicate::eq(self.column, self.sort_value.as_str()),
                Predicate::cmp_op(ID_COLUMN, op, self.record_id.as_str()),
            ]),
        ])
    }

    /// Returns `true` if a row with the given key sorts strictly after the
    /// resume point. Agrees with [`to_predicate`](Self::to_predicate).
    pub fn admits(&self, sort_value: &str, record_id: &str) -> bool {
        let row = (sort_value.as_bytes(), record_id.as_bytes());
        let bound = (self.sort_value.as_bytes(), self.record_id.as_bytes());
        match self.order {
            SortOrder::Asc => row > bound,
            SortOrder::Desc => row < bound,
        }
    }
}

//! Storage query types.
//!
//! A [`PageQuery`] is what the pagination engine hands to a storage
//! backend: a boolean [`Predicate`] over named columns, a two-column
//! ordering, and a row limit. Backends translate it into their own query
//! language; [`Predicate::matches`] gives the reference semantics for
//! in-process evaluation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::pagination::SortOrder;

/// Name of the unique record-id column used as the ordering tie-breaker.
pub const ID_COLUMN: &str = "id";

/// Name of the owner column every listing is scoped by.
pub const OWNER_COLUMN: &str = "owner_id";

/// A scalar compared against a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Text value, compared byte-wise.
    Text(String),
    /// Integer value.
    Integer(i64),
}

impl FilterValue {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        FilterValue::Text(s.into())
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            FilterValue::Integer(_) => None,
        }
    }

    fn compare(&self, other: &FilterValue) -> Option<Ordering> {
        match (self, other) {
            (FilterValue::Text(a), FilterValue::Text(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
            (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Integer(n)
    }
}

/// Comparison operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal.
    Eq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Case-insensitive (ASCII) substring match on text.
    ContainsCi,
}

impl CompareOp {
    /// Operator selecting values strictly after a bound in the given direction.
    pub fn strictly_after(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => CompareOp::Gt,
            SortOrder::Desc => CompareOp::Lt,
        }
    }
}

/// A single `column <op> value` comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Column name.
    pub column: &'static str,
    /// Operator.
    pub op: CompareOp,
    /// Right-hand value.
    pub value: FilterValue,
}

/// Boolean predicate over named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// A single comparison.
    Compare(Condition),
    /// Conjunction. An empty list is true.
    And(Vec<Predicate>),
    /// Disjunction. An empty list is false.
    Or(Vec<Predicate>),
}

impl Predicate {
    fn compare(column: &'static str, op: CompareOp, value: impl Into<FilterValue>) -> Self {
        Predicate::Compare(Condition {
            column,
            op,
            value: value.into(),
        })
    }

    /// `column = value`
    #[must_use]
    pub fn eq(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// `column < value`
    #[must_use]
    pub fn lt(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// `column <= value`
    #[must_use]
    pub fn lte(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, CompareOp::Lte, value)
    }

    /// `column > value`
    #[must_use]
    pub fn gt(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// `column >= value`
    #[must_use]
    pub fn gte(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, CompareOp::Gte, value)
    }

    /// Case-insensitive substring match.
    #[must_use]
    pub fn contains_ci(column: &'static str, needle: impl Into<String>) -> Self {
        Self::compare(column, CompareOp::ContainsCi, FilterValue::Text(needle.into()))
    }

    /// `column <op> value` with an operator chosen at runtime.
    #[must_use]
    pub fn cmp_op(column: &'static str, op: CompareOp, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, op, value)
    }

    /// Folds a list of clauses into one conjunction, avoiding a wrapper for
    /// zero or one clause.
    pub fn all(mut clauses: Vec<Predicate>) -> Option<Predicate> {
        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Predicate::And(clauses)),
        }
    }

    /// Evaluates the predicate against a row.
    ///
    /// A column the row does not expose, or a type mismatch between the
    /// column and the value, makes the comparison false. A missing (null)
    /// value never matches, mirroring SQL comparison with `NULL`.
    pub fn matches<C: ColumnValues + ?Sized>(&self, row: &C) -> bool {
        match self {
            Predicate::And(clauses) => clauses.iter().all(|p| p.matches(row)),
            Predicate::Or(clauses) => clauses.iter().any(|p| p.matches(row)),
            Predicate::Compare(cond) => {
                let Some(actual) = row.column(cond.column) else {
                    return false;
                };
                match cond.op {
                    CompareOp::ContainsCi => match (actual.as_text(), cond.value.as_text()) {
                        (Some(haystack), Some(needle)) => haystack
                            .to_ascii_lowercase()
                            .contains(&needle.to_ascii_lowercase()),
                        _ => false,
                    },
                    op => match actual.compare(&cond.value) {
                        Some(ordering) => match op {
                            CompareOp::Eq => ordering == Ordering::Equal,
                            CompareOp::Lt => ordering == Ordering::Less,
                            CompareOp::Lte => ordering != Ordering::Greater,
                            CompareOp::Gt => ordering == Ordering::Greater,
                            CompareOp::Gte => ordering != Ordering::Less,
                            CompareOp::ContainsCi => false,
                        },
                        None => false,
                    },
                }
            }
        }
    }
}

/// Column access for in-process predicate evaluation.
pub trait ColumnValues {
    /// Returns the value of the named column, or `None` when it is null or
    /// unknown.
    fn column(&self, name: &str) -> Option<FilterValue>;
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Column name.
    pub column: &'static str,
    /// Direction.
    pub order: SortOrder,
}

/// A fully built query for one page of a listing.
///
/// `limit` is the number of rows to fetch, which is one more than the page
/// size so the assembler can tell whether another page exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Filter and keyset clauses, already combined with AND.
    pub predicate: Option<Predicate>,
    /// Primary sort column followed by the id tie-breaker.
    pub order_by: [OrderBy; 2],
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl PageQuery {
    /// Returns `true` if a row satisfies the predicate.
    pub fn admits<C: ColumnValues + ?Sized>(&self, row: &C) -> bool {
        self.predicate.as_ref().is_none_or(|p| p.matches(row))
    }

    /// Compares two rows by this query's ordering.
    pub fn compare_rows<C: ColumnValues + ?Sized>(&self, a: &C, b: &C) -> Ordering {
        for term in &self.order_by {
            let left = a.column(term.column);
            let right = b.column(term.column);
            let ordering = match (left, right) {
                (Some(l), Some(r)) => l.compare(&r).unwrap_or(Ordering::Equal),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            };
            let ordering = match term.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

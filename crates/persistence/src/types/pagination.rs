//! Pagination types for list results.
//!
//! This module defines the sort direction, the page container returned to
//! callers, and the canonical string forms used for sort values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// A sort specification: one of the resource's sortable fields plus a direction.
///
/// The record id is always appended as a tie-breaker in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort<S> {
    /// The field to sort by.
    pub field: S,
    /// The direction.
    pub order: SortOrder,
}

impl<S> Sort<S> {
    /// Creates a new sort specification.
    pub fn new(field: S, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Ascending sort on the given field.
    pub fn asc(field: S) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    /// Descending sort on the given field.
    pub fn desc(field: S) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The cursor for the next page, if there is one.
    pub next_cursor: Option<String>,

    /// Whether there are more results after this page.
    pub has_next: bool,
}

impl PageInfo {
    /// Creates page info indicating no more pages.
    pub fn end() -> Self {
        Self {
            next_cursor: None,
            has_next: false,
        }
    }

    /// Creates page info with an encoded next cursor.
    pub fn with_next(token: String) -> Self {
        Self {
            next_cursor: Some(token),
            has_next: true,
        }
    }
}

/// A page of list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,

    /// Pagination information.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page with the given items and page info.
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the next-page cursor, if any.
    pub fn next_cursor(&self) -> Option<&str> {
        self.page_info.next_cursor.as_deref()
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), PageInfo::end())
    }
}

/// Canonical sort-value form of a timestamp.
///
/// RFC 3339 in UTC with fixed microsecond precision and a `Z` suffix, so that
/// byte-wise comparison of two values agrees with chronological order. The
/// SQLite backend stores timestamps in this exact form.
pub fn timestamp_sort_value(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Canonical sort-value form of a calendar date (`YYYY-MM-DD`).
pub fn date_sort_value(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns `true` if the date renders as exactly four year digits.
///
/// Outside years 0000-9999 the `%Y` form gains a sign or a fifth digit and
/// byte order no longer follows the calendar.
pub fn is_sortable_date(date: &NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// The canonical form a sort field's values take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortValueKind {
    /// Free text, compared byte-wise.
    Text,
    /// A [`timestamp_sort_value`] string.
    Timestamp,
    /// A [`date_sort_value`] string with a four-digit year.
    Date,
}

impl SortValueKind {
    /// Returns `true` if `value` is in this kind's canonical form.
    ///
    /// Values are reparsed and re-rendered, so non-canonical spellings of a
    /// valid instant (offsets, missing fraction, other precisions) fail.
    pub fn is_canonical(self, value: &str) -> bool {
        match self {
            SortValueKind::Text => true,
            SortValueKind::Timestamp => DateTime::parse_from_rfc3339(value)
                .map(|ts| timestamp_sort_value(&ts.with_timezone(&Utc)) == value)
                .unwrap_or(false),
            SortValueKind::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| is_sortable_date(&date) && date_sort_value(&date) == value)
                .unwrap_or(false),
        }
    }
}

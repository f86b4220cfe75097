//! List query types.
//!
//! This module defines the types a caller uses to describe a list operation
//! against a collection: sort fields with directions, an optional text
//! filter, and an offset/limit window. Sort fields arrive here already
//! translated to source field paths; the storage layer applies them
//! literally and performs no mapping of its own.

use serde::{Deserialize, Serialize};

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    ///
    /// ```
    /// use coursebook_store::types::Direction;
    ///
    /// assert_eq!(Direction::Ascending.reverse(), Direction::Descending);
    /// assert_eq!(Direction::Descending.reverse(), Direction::Ascending);
    /// ```
    pub fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// A single sort instruction: a field path and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Dotted path into the entity content (e.g., "firstName").
    path: String,

    /// Direction to sort this field in.
    direction: Direction,
}

impl SortField {
    /// Creates a new sort field.
    pub fn new(path: impl Into<String>, direction: Direction) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }

    /// Shorthand for an ascending sort field.
    pub fn ascending(path: impl Into<String>) -> Self {
        Self::new(path, Direction::Ascending)
    }

    /// Shorthand for a descending sort field.
    pub fn descending(path: impl Into<String>) -> Self {
        Self::new(path, Direction::Descending)
    }

    /// Returns the field path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// A list operation: sorting, filtering, and an offset/limit window.
///
/// # Examples
///
/// ```
/// use coursebook_store::types::{ListQuery, SortField};
///
/// let query = ListQuery::new()
///     .with_sort(vec![SortField::ascending("title")])
///     .with_filter("sailing")
///     .with_offset(10)
///     .with_limit(10);
///
/// assert_eq!(query.limit(), Some(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Sort fields, applied in order (first field is most significant).
    sort: Vec<SortField>,

    /// Case-insensitive substring filter over string values.
    filter: Option<String>,

    /// Number of matching entities to skip.
    offset: usize,

    /// Maximum number of entities to return. `None` means unbounded.
    limit: Option<usize>,
}

impl ListQuery {
    /// Creates an empty query: no sorting, no filter, full collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sort fields.
    pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the text filter.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the number of entities to skip.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the maximum number of entities to return.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the sort fields.
    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    /// Returns the text filter, if any.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Returns the number of entities to skip.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the maximum number of entities to return.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// One page of results together with the total match count.
///
/// `total` counts every entity matching the query's filter, before the
/// offset/limit window is applied, so callers can compute page counts.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The entities on this page.
    items: Vec<T>,

    /// Total number of entities matching the query, ignoring offset/limit.
    total: u64,
}

impl<T> Page<T> {
    /// Creates a page from items and total match count.
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Creates an empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Returns the entities on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes self and returns the entities.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the total number of entities matching the query.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of entities on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps each item on the page, preserving the total.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

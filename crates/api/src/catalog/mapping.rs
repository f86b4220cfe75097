//! Sort-mapping types.
//!
//! A [`PropertyMapping`] translates one client-facing sort name into the
//! ordered storage fields that realize it. A single client field may expand
//! to several storage fields (a composite key such as `name` backed by
//! `firstName` + `lastName`), and each storage field may flip the client's
//! requested direction (`age` sorts by `dateOfBirth` reverted).

use coursebook_store::types::{Direction, SortField};

/// One underlying storage field behind a client sort name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceField {
    path: String,
    revert_order: bool,
}

impl SourceField {
    /// Creates a source field that follows the client's requested direction.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            revert_order: false,
        }
    }

    /// Creates a source field that flips the client's requested direction.
    pub fn reverted(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            revert_order: true,
        }
    }

    /// Returns the storage field path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if this field flips the requested direction.
    pub fn revert_order(&self) -> bool {
        self.revert_order
    }

    /// Returns the effective direction for a requested direction.
    pub fn effective_direction(&self, requested: Direction) -> Direction {
        if self.revert_order {
            requested.reverse()
        } else {
            requested
        }
    }
}

/// A client sort name and the storage fields that realize it.
#[derive(Debug, Clone)]
pub struct PropertyMapping {
    client_field: String,
    source_fields: Vec<SourceField>,
    default_sort: bool,
}

impl PropertyMapping {
    /// Creates a mapping from a client field to its source fields.
    pub fn new(client_field: impl Into<String>, source_fields: Vec<SourceField>) -> Self {
        Self {
            client_field: client_field.into(),
            source_fields,
            default_sort: false,
        }
    }

    /// Marks this mapping as the entity's default sort.
    pub fn as_default(mut self) -> Self {
        self.default_sort = true;
        self
    }

    /// Returns the client-facing field name.
    pub fn client_field(&self) -> &str {
        &self.client_field
    }

    /// Returns the underlying source fields in declared order.
    pub fn source_fields(&self) -> &[SourceField] {
        &self.source_fields
    }

    /// Returns true if this is the entity's default sort.
    pub fn is_default_sort(&self) -> bool {
        self.default_sort
    }

    /// Expands this mapping to resolved sort fields for a requested direction.
    pub fn expand(&self, requested: Direction) -> Vec<SortField> {
        self.source_fields
            .iter()
            .map(|source| SortField::new(source.path(), source.effective_direction(requested)))
            .collect()
    }
}

/// A client's parsed sort instruction: a field name and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// The client-facing field name.
    pub field: String,
    /// Requested direction.
    pub direction: Direction,
}

impl SortKey {
    /// Creates an ascending sort key.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    /// Creates a descending sort key.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_direction() {
        let plain = SourceField::new("lastName");
        assert_eq!(
            plain.effective_direction(Direction::Descending),
            Direction::Descending
        );

        let reverted = SourceField::reverted("dateOfBirth");
        assert_eq!(
            reverted.effective_direction(Direction::Ascending),
            Direction::Descending
        );
        assert_eq!(
            reverted.effective_direction(Direction::Descending),
            Direction::Ascending
        );
    }

    #[test]
    fn test_expand_composite_mapping() {
        let mapping = PropertyMapping::new(
            "name",
            vec![SourceField::reverted("firstName"), SourceField::new("lastName")],
        );

        let expanded = mapping.expand(Direction::Descending);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].path(), "firstName");
        assert_eq!(expanded[0].direction(), Direction::Ascending);
        assert_eq!(expanded[1].path(), "lastName");
        assert_eq!(expanded[1].direction(), Direction::Descending);
    }

    #[test]
    fn test_sort_key_constructors() {
        assert_eq!(SortKey::ascending("title").direction, Direction::Ascending);
        assert_eq!(SortKey::descending("title").direction, Direction::Descending);
    }
}

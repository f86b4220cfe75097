//! Stored entity record.
//!
//! This module defines the [`StoredEntity`] type, which wraps an entity's JSON
//! content with persistence metadata (collection name, id, timestamps).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entity with persistence metadata.
///
/// `StoredEntity` wraps a schemaless JSON document along with the metadata
/// the storage layer tracks for it:
///
/// - **Identity**: collection name (entity type) and logical id
/// - **Timestamps**: creation and last-modification times
///
/// # Examples
///
/// ```
/// use coursebook_store::types::StoredEntity;
/// use serde_json::json;
///
/// let entity = StoredEntity::new(
///     "authors",
///     "a1",
///     json!({"id": "a1", "firstName": "Nancy", "lastName": "Rock"}),
/// );
///
/// assert_eq!(entity.entity_type(), "authors");
/// assert_eq!(entity.id(), "a1");
/// assert_eq!(entity.url(), "authors/a1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntity {
    /// The collection the entity belongs to (e.g., "authors").
    entity_type: String,

    /// The entity's logical id.
    id: String,

    /// The entity content as JSON.
    content: Value,

    /// When the entity was first created.
    created_at: DateTime<Utc>,

    /// When the entity was last modified.
    last_modified: DateTime<Utc>,
}

impl StoredEntity {
    /// Creates a new stored entity with both timestamps set to now.
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>, content: Value) -> Self {
        let now = Utc::now();
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            content,
            created_at: now,
            last_modified: now,
        }
    }

    /// Creates a stored entity from existing data (e.g., loaded from a backend).
    pub fn from_storage(
        entity_type: impl Into<String>,
        id: impl Into<String>,
        content: Value,
        created_at: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            content,
            created_at,
            last_modified,
        }
    }

    /// Returns the collection the entity belongs to.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Returns the entity's logical id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the entity content as JSON.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Returns a mutable reference to the entity content.
    pub fn content_mut(&mut self) -> &mut Value {
        &mut self.content
    }

    /// Consumes self and returns the content.
    pub fn into_content(self) -> Value {
        self.content
    }

    /// Returns when the entity was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the entity was last modified.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Returns the relative URL path for this entity (e.g., "authors/a1").
    pub fn url(&self) -> String {
        format!("{}/{}", self.entity_type, self.id)
    }

    /// Looks up a value inside the content by dotted field path.
    ///
    /// Missing segments yield `None`; callers usually treat that as JSON null.
    ///
    /// ```
    /// use coursebook_store::types::StoredEntity;
    /// use serde_json::json;
    ///
    /// let entity = StoredEntity::new(
    ///     "authors",
    ///     "a1",
    ///     json!({"name": {"first": "Nancy"}}),
    /// );
    /// assert_eq!(entity.field("name.first"), Some(&json!("Nancy")));
    /// assert_eq!(entity.field("name.middle"), None);
    /// ```
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.content;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_sets_timestamps() {
        let entity = StoredEntity::new("courses", "c1", json!({"title": "Sailing"}));
        assert_eq!(entity.created_at(), entity.last_modified());
        assert_eq!(entity.url(), "courses/c1");
    }

    #[test]
    fn test_field_lookup_top_level() {
        let entity = StoredEntity::new("authors", "a1", json!({"firstName": "Berry"}));
        assert_eq!(entity.field("firstName"), Some(&json!("Berry")));
        assert_eq!(entity.field("lastName"), None);
    }

    #[test]
    fn test_field_lookup_nested() {
        let entity = StoredEntity::new(
            "authors",
            "a1",
            json!({"address": {"city": "Tortuga", "country": "Caribbean"}}),
        );
        assert_eq!(entity.field("address.city"), Some(&json!("Tortuga")));
        assert_eq!(entity.field("address.zip"), None);
        assert_eq!(entity.field("address.city.deeper"), None);
    }

    #[test]
    fn test_into_content() {
        let content = json!({"id": "a1"});
        let entity = StoredEntity::new("authors", "a1", content.clone());
        assert_eq!(entity.into_content(), content);
    }
}

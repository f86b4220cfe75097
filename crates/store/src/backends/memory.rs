//! In-memory storage backend.
//!
//! Entities live in a `RwLock`-guarded map of collections. Each collection
//! is a `BTreeMap` keyed by entity id, so unsorted listings come back in a
//! stable id order and sorted listings get a deterministic tie-break for
//! free (the sort below is stable).

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::EntityStore;
use crate::error::{StoreError, StoreResult};
use crate::types::{Direction, ListQuery, Page, SortField, StoredEntity};

type Collections = HashMap<String, BTreeMap<String, StoredEntity>>;

/// In-memory entity store.
///
/// Holds collections of entities behind a `RwLock`. Writes replace whole
/// entities (last writer wins); reads never block each other.
///
/// # Examples
///
/// ```
/// use coursebook_store::backends::MemoryStore;
/// use coursebook_store::core::EntityStore;
/// use coursebook_store::types::ListQuery;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let store = MemoryStore::new();
/// store.insert("courses", "c1", json!({"id": "c1", "title": "Sailing"}))?;
///
/// let page = store.list("courses", &ListQuery::new()).await?;
/// assert_eq!(page.len(), 1);
/// # Ok::<(), coursebook_store::error::StoreError>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity, replacing any existing entity with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the content is not a JSON object.
    pub fn insert(
        &self,
        entity_type: impl Into<String>,
        id: impl Into<String>,
        content: Value,
    ) -> StoreResult<()> {
        self.insert_entity(StoredEntity::new(entity_type, id, content))
    }

    /// Inserts a fully-constructed entity, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the content is not a JSON object.
    pub fn insert_entity(&self, entity: StoredEntity) -> StoreResult<()> {
        if !entity.content().is_object() {
            return Err(StoreError::Corrupt {
                entity_type: entity.entity_type().to_string(),
                id: entity.id().to_string(),
                message: "content must be a JSON object".to_string(),
            });
        }

        let mut collections = self.write_guard();
        collections
            .entry(entity.entity_type().to_string())
            .or_default()
            .insert(entity.id().to_string(), entity);
        Ok(())
    }

    /// Removes all entities from all collections.
    pub fn clear(&self) {
        self.write_guard().clear();
    }

    /// Returns the number of entities in a collection.
    pub fn len(&self, entity_type: &str) -> usize {
        self.read_guard()
            .get(entity_type)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// Returns true if a collection holds no entities.
    pub fn is_empty(&self, entity_type: &str) -> bool {
        self.len(entity_type) == 0
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Collections> {
        match self.collections.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.read",
                    result = "poisoned_recovered",
                    "Recovered from poisoned store lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Collections> {
        match self.collections.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.write",
                    result = "poisoned_recovered",
                    "Recovered from poisoned store lock"
                );
                poisoned.into_inner()
            }
        }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, entity_type: &str, query: &ListQuery) -> StoreResult<Page<StoredEntity>> {
        let collections = self.read_guard();
        let Some(collection) = collections.get(entity_type) else {
            debug!(entity_type, "Listing unknown collection");
            return Ok(Page::empty());
        };

        let mut matches: Vec<&StoredEntity> = collection
            .values()
            .filter(|entity| matches_filter(entity, query.filter()))
            .collect();
        let total = matches.len() as u64;

        if !query.sort().is_empty() {
            matches.sort_by(|a, b| compare_entities(a, b, query.sort()));
        }

        let items: Vec<StoredEntity> = matches
            .into_iter()
            .skip(query.offset())
            .take(query.limit().unwrap_or(usize::MAX))
            .cloned()
            .collect();

        debug!(
            entity_type,
            total,
            returned = items.len(),
            "Listed collection"
        );
        Ok(Page::new(items, total))
    }

    async fn get(&self, entity_type: &str, id: &str) -> StoreResult<Option<StoredEntity>> {
        let collections = self.read_guard();
        let found = collections
            .get(entity_type)
            .and_then(|collection| collection.get(id))
            .cloned();
        debug!(entity_type, id, found = found.is_some(), "Fetched entity");
        Ok(found)
    }
}

/// Returns true if the entity matches the filter text.
///
/// A `None` filter matches everything. Otherwise the entity matches when
/// any top-level string value in its content contains the filter text,
/// compared case-insensitively.
fn matches_filter(entity: &StoredEntity, filter: Option<&str>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let needle = filter.to_lowercase();
    let Some(fields) = entity.content().as_object() else {
        return false;
    };
    fields.values().any(|value| match value {
        Value::String(s) => s.to_lowercase().contains(&needle),
        _ => false,
    })
}

/// Compares two entities field by field; the first non-equal field decides.
fn compare_entities(a: &StoredEntity, b: &StoredEntity, sort: &[SortField]) -> Ordering {
    for field in sort {
        let left = a.field(field.path()).unwrap_or(&Value::Null);
        let right = b.field(field.path()).unwrap_or(&Value::Null);
        let ordering = match field.direction() {
            Direction::Ascending => compare_values(left, right),
            Direction::Descending => compare_values(left, right).reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Orders JSON values: null < bool < number < string < array < object.
///
/// Strings compare case-insensitively. Arrays and objects are opaque here
/// and compare equal within their kind.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn kind_rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded_authors() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert(
                "authors",
                "a1",
                json!({
                    "id": "a1",
                    "firstName": "Berry",
                    "lastName": "Griffin Beak Eldritch",
                    "dateOfBirth": "1980-05-24",
                    "mainCategory": "Ships"
                }),
            )
            .unwrap();
        store
            .insert(
                "authors",
                "a2",
                json!({
                    "id": "a2",
                    "firstName": "Nancy",
                    "lastName": "Swashbuckle Rye",
                    "dateOfBirth": "1668-12-23",
                    "mainCategory": "Rum"
                }),
            )
            .unwrap();
        store
            .insert(
                "authors",
                "a3",
                json!({
                    "id": "a3",
                    "firstName": "Berry",
                    "lastName": "Arjun",
                    "dateOfBirth": "1702-03-06",
                    "mainCategory": "Maps"
                }),
            )
            .unwrap();
        store
    }

    fn first_names(page: &Page<StoredEntity>) -> Vec<String> {
        page.items()
            .iter()
            .map(|e| {
                e.field("firstName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(MemoryStore::new().backend_name(), "memory");
    }

    #[test]
    fn test_insert_rejects_non_object_content() {
        let store = MemoryStore::new();
        let err = store.insert("authors", "a1", json!("not an object"));
        assert!(matches!(err, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let store = MemoryStore::new();
        store.insert("authors", "a1", json!({"v": 1})).unwrap();
        store.insert("authors", "a1", json!({"v": 2})).unwrap();
        assert_eq!(store.len("authors"), 1);
    }

    #[test]
    fn test_clear() {
        let store = seeded_authors();
        assert_eq!(store.len("authors"), 3);
        store.clear();
        assert!(store.is_empty("authors"));
    }

    #[tokio::test]
    async fn test_get_returns_entity() {
        let store = seeded_authors();
        let entity = store.get("authors", "a2").await.unwrap().unwrap();
        assert_eq!(entity.field("firstName"), Some(&json!("Nancy")));
    }

    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let store = seeded_authors();
        assert!(store.get("authors", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_collection_returns_none() {
        let store = seeded_authors();
        assert!(store.get("ships", "a1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_unknown_collection_is_empty() {
        let store = seeded_authors();
        let page = store.list("ships", &ListQuery::new()).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 0);
    }

    #[tokio::test]
    async fn test_list_unsorted_uses_id_order() {
        let store = seeded_authors();
        let page = store.list("authors", &ListQuery::new()).await.unwrap();
        let ids: Vec<&str> = page.items().iter().map(StoredEntity::id).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
        assert_eq!(page.total(), 3);
    }

    #[tokio::test]
    async fn test_list_sorts_ascending() {
        let store = seeded_authors();
        let query = ListQuery::new().with_sort(vec![SortField::ascending("lastName")]);
        let page = store.list("authors", &query).await.unwrap();
        let ids: Vec<&str> = page.items().iter().map(StoredEntity::id).collect();
        assert_eq!(ids, vec!["a3", "a1", "a2"]);
    }

    #[tokio::test]
    async fn test_list_sorts_descending() {
        let store = seeded_authors();
        let query = ListQuery::new().with_sort(vec![SortField::descending("dateOfBirth")]);
        let page = store.list("authors", &query).await.unwrap();
        let ids: Vec<&str> = page.items().iter().map(StoredEntity::id).collect();
        assert_eq!(ids, vec!["a1", "a3", "a2"]);
    }

    #[tokio::test]
    async fn test_list_multi_field_sort() {
        let store = seeded_authors();
        let query = ListQuery::new().with_sort(vec![
            SortField::ascending("firstName"),
            SortField::descending("lastName"),
        ]);
        let page = store.list("authors", &query).await.unwrap();
        // Both Berrys first, tie broken by lastName descending.
        assert_eq!(first_names(&page), vec!["Berry", "Berry", "Nancy"]);
        let ids: Vec<&str> = page.items().iter().map(StoredEntity::id).collect();
        assert_eq!(ids, vec!["a1", "a3", "a2"]);
    }

    #[tokio::test]
    async fn test_list_missing_field_sorts_first() {
        let store = seeded_authors();
        store
            .insert("authors", "a0", json!({"id": "a0", "firstName": "Anne"}))
            .unwrap();
        let query = ListQuery::new().with_sort(vec![SortField::ascending("mainCategory")]);
        let page = store.list("authors", &query).await.unwrap();
        assert_eq!(page.items()[0].id(), "a0");
    }

    #[tokio::test]
    async fn test_list_string_sort_is_case_insensitive() {
        let store = MemoryStore::new();
        store
            .insert("tags", "t1", json!({"id": "t1", "name": "banana"}))
            .unwrap();
        store
            .insert("tags", "t2", json!({"id": "t2", "name": "Apple"}))
            .unwrap();
        let query = ListQuery::new().with_sort(vec![SortField::ascending("name")]);
        let page = store.list("tags", &query).await.unwrap();
        let ids: Vec<&str> = page.items().iter().map(StoredEntity::id).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[tokio::test]
    async fn test_list_filter_matches_any_string_field() {
        let store = seeded_authors();
        let query = ListQuery::new().with_filter("RUM");
        let page = store.list("authors", &query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items()[0].id(), "a2");
        assert_eq!(page.total(), 1);
    }

    #[tokio::test]
    async fn test_list_filter_no_matches() {
        let store = seeded_authors();
        let query = ListQuery::new().with_filter("kraken");
        let page = store.list("authors", &query).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 0);
    }

    #[tokio::test]
    async fn test_list_window_keeps_full_total() {
        let store = seeded_authors();
        let query = ListQuery::new()
            .with_sort(vec![SortField::ascending("id")])
            .with_offset(1)
            .with_limit(1);
        let page = store.list("authors", &query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items()[0].id(), "a2");
        assert_eq!(page.total(), 3);
    }

    #[tokio::test]
    async fn test_list_offset_past_end_is_empty() {
        let store = seeded_authors();
        let query = ListQuery::new().with_offset(10);
        let page = store.list("authors", &query).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 3);
    }

    #[tokio::test]
    async fn test_count_ignores_window() {
        let store = seeded_authors();
        let query = ListQuery::new().with_offset(2).with_limit(1);
        assert_eq!(store.count("authors", &query).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_numeric_sort() {
        let store = MemoryStore::new();
        store
            .insert("scores", "s1", json!({"id": "s1", "points": 10}))
            .unwrap();
        store
            .insert("scores", "s2", json!({"id": "s2", "points": 2}))
            .unwrap();
        let query = ListQuery::new().with_sort(vec![SortField::ascending("points")]);
        let page = store.list("scores", &query).await.unwrap();
        let ids: Vec<&str> = page.items().iter().map(StoredEntity::id).collect();
        assert_eq!(ids, vec!["s2", "s1"]);
    }
}

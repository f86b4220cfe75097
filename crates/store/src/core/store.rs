//! Storage trait for entity collections.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{ListQuery, Page, StoredEntity};

/// Storage interface for entity collections.
///
/// Implementations hold schemaless JSON entities grouped into named
/// collections and answer read queries against them. Sort fields in a
/// [`ListQuery`] are literal paths into the stored content; translating
/// client-facing names into those paths happens upstream.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Returns the name of this storage backend (e.g., "memory").
    fn backend_name(&self) -> &'static str;

    /// Lists entities in a collection.
    ///
    /// Applies the query's filter, then its sort fields, then the
    /// offset/limit window. The returned page's `total` counts all
    /// entities that matched the filter, before windowing.
    ///
    /// # Arguments
    ///
    /// * `entity_type` - The collection to list (e.g., "authors")
    /// * `query` - Filter, sort, and windowing to apply
    ///
    /// # Returns
    ///
    /// A page of matching entities. An unknown collection yields an
    /// empty page, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or holds malformed content.
    async fn list(&self, entity_type: &str, query: &ListQuery) -> StoreResult<Page<StoredEntity>>;

    /// Retrieves a single entity by id.
    ///
    /// # Arguments
    ///
    /// * `entity_type` - The collection to look in
    /// * `id` - The entity's logical id
    ///
    /// # Returns
    ///
    /// The entity, or `None` if the collection or id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or holds malformed content.
    async fn get(&self, entity_type: &str, id: &str) -> StoreResult<Option<StoredEntity>>;

    /// Counts entities in a collection matching a query's filter.
    ///
    /// The default implementation lists with the filter only and reads
    /// the page total; backends may override with something cheaper.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn count(&self, entity_type: &str, query: &ListQuery) -> StoreResult<u64> {
        let mut filter_only = ListQuery::new();
        if let Some(filter) = query.filter() {
            filter_only = filter_only.with_filter(filter);
        }
        let page = self.list(entity_type, &filter_only).await?;
        Ok(page.total())
    }
}

// Shared handles delegate, so a caller can keep a reference to a store it
// has handed to the server.
#[async_trait]
impl<S> EntityStore for std::sync::Arc<S>
where
    S: EntityStore + ?Sized,
{
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn list(&self, entity_type: &str, query: &ListQuery) -> StoreResult<Page<StoredEntity>> {
        (**self).list(entity_type, query).await
    }

    async fn get(&self, entity_type: &str, id: &str) -> StoreResult<Option<StoredEntity>> {
        (**self).get(entity_type, id).await
    }

    async fn count(&self, entity_type: &str, query: &ListQuery) -> StoreResult<u64> {
        (**self).count(entity_type, query).await
    }
}

//! Application state for the Coursebook API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend, the entity catalog, and the server
//! configuration.

use std::sync::Arc;

use coursebook_store::EntityStore;

use crate::catalog::EntityCatalog;
use crate::config::ServerConfig;

/// Shared application state for the API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`EntityStore`])
pub struct AppState<S> {
    /// The storage backend.
    store: Arc<S>,

    /// The immutable entity catalog built at startup.
    catalog: Arc<EntityCatalog>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: EntityStore> AppState<S> {
    /// Creates a new AppState with the given store, catalog, and configuration.
    pub fn new(store: Arc<S>, catalog: EntityCatalog, config: ServerConfig) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the entity catalog.
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Returns a clone of the catalog Arc.
    pub fn catalog_arc(&self) -> Arc<EntityCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the default page size for list results.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }

    /// Returns the maximum page size for list results.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }
}

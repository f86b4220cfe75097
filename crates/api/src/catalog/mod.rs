//! Entity catalog: sort mappings, declared field sets, cache policy.
//!
//! The catalog is the startup-time registry behind client-driven sorting and
//! field shaping. For each entity type it holds:
//!
//! - the declared public field set, lowercased once at build for O(1)
//!   case-insensitive membership tests (no per-request reflection-style
//!   lookups),
//! - the sortable-property mappings, including the one mandatory default,
//! - the cache directives for the entity's routes.
//!
//! It is built once through [`EntityCatalogBuilder`], validated at build
//! time, and shared read-only for the life of the process.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use coursebook_store::types::{Direction, SortField};

use crate::cache::CacheDirectives;

mod builder;
mod demo;
mod mapping;

pub use builder::{EntityCatalogBuilder, EntityDefinitionBuilder};
pub use demo::demo_catalog;
pub use mapping::{PropertyMapping, SortKey, SourceField};

/// Catalog construction errors. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The same entity type was registered twice.
    #[error("entity type '{entity_type}' registered more than once")]
    DuplicateEntity {
        /// The offending entity type.
        entity_type: String,
    },

    /// The same client sort field was registered twice for one entity.
    #[error("sort field '{field}' registered more than once for '{entity_type}'")]
    DuplicateClientField {
        /// The entity type holding the duplicate.
        entity_type: String,
        /// The duplicated client field name.
        field: String,
    },

    /// A sort mapping has no source fields.
    #[error("sort field '{field}' for '{entity_type}' has no source fields")]
    EmptySourceFields {
        /// The entity type holding the empty mapping.
        entity_type: String,
        /// The client field with no sources.
        field: String,
    },

    /// An entity has zero or more than one default sort.
    #[error("entity type '{entity_type}' has {count} default sort fields, expected exactly 1")]
    DefaultSortCount {
        /// The misconfigured entity type.
        entity_type: String,
        /// How many defaults were registered.
        count: usize,
    },

    /// A user-scoped entity was given a public cache location.
    #[error("entity type '{entity_type}' is user-scoped and cannot be publicly cacheable")]
    PublicUserScoped {
        /// The misconfigured entity type.
        entity_type: String,
    },
}

/// Per-request lookup failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// The entity type is not registered.
    #[error("unknown entity type '{entity_type}'")]
    UnknownEntity {
        /// The unregistered entity type.
        entity_type: String,
    },

    /// One or more requested field names are not valid for the entity.
    ///
    /// Carries every invalid name so a client can correct its request in
    /// one round trip.
    #[error("unknown fields: {}", .fields.join(", "))]
    UnknownFields {
        /// All invalid names, in request order.
        fields: Vec<String>,
    },
}

/// One entity type's catalog entry.
#[derive(Debug)]
pub struct EntityDefinition {
    name: String,
    /// Declared public fields, lowercased at build.
    fields: HashSet<String>,
    mappings: Vec<PropertyMapping>,
    directives: CacheDirectives,
}

impl EntityDefinition {
    fn default_mapping(&self) -> &PropertyMapping {
        // Exactly one default is guaranteed by the builder.
        self.mappings
            .iter()
            .find(|mapping| mapping.is_default_sort())
            .unwrap_or_else(|| unreachable!("catalog built without default sort for {}", self.name))
    }

    fn mapping_for(&self, client_field: &str) -> Option<&PropertyMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.client_field().eq_ignore_ascii_case(client_field))
    }
}

/// Immutable registry of entity definitions.
#[derive(Debug)]
pub struct EntityCatalog {
    entities: HashMap<String, EntityDefinition>,
}

impl EntityCatalog {
    /// Starts a catalog builder.
    pub fn builder() -> EntityCatalogBuilder {
        EntityCatalogBuilder::new()
    }

    /// Returns true if the entity type is registered.
    pub fn contains_entity(&self, entity_type: &str) -> bool {
        self.entities.contains_key(entity_type)
    }

    /// Returns the registered entity type names.
    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Resolves client sort keys to storage sort fields.
    ///
    /// Each key expands to its mapping's source fields in declared order,
    /// with per-field direction reversal applied against the key's
    /// requested direction.
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownFields`] listing every unmapped client field,
    /// or [`LookupError::UnknownEntity`] for an unregistered entity type.
    pub fn resolve_sort(
        &self,
        entity_type: &str,
        keys: &[SortKey],
    ) -> Result<Vec<SortField>, LookupError> {
        let entity = self.entity(entity_type)?;

        let mut resolved = Vec::new();
        let mut invalid = Vec::new();
        for key in keys {
            match entity.mapping_for(&key.field) {
                Some(mapping) => resolved.extend(mapping.expand(key.direction)),
                None => invalid.push(key.field.clone()),
            }
        }

        if invalid.is_empty() {
            Ok(resolved)
        } else {
            Err(LookupError::UnknownFields { fields: invalid })
        }
    }

    /// Returns the entity's default sort, expanded ascending.
    ///
    /// Never fails for a registered entity type; exactly one default is
    /// guaranteed at build time.
    pub fn default_sort(&self, entity_type: &str) -> Result<Vec<SortField>, LookupError> {
        let entity = self.entity(entity_type)?;
        Ok(entity.default_mapping().expand(Direction::Ascending))
    }

    /// Validates that every requested field is declared for the entity.
    ///
    /// Comparison is case-insensitive against the precomputed field set.
    /// An empty request is always valid and means "full representation".
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownFields`] listing every invalid name.
    pub fn validate_shape(
        &self,
        entity_type: &str,
        requested: &[String],
    ) -> Result<(), LookupError> {
        let entity = self.entity(entity_type)?;

        let invalid: Vec<String> = requested
            .iter()
            .filter(|field| !entity.fields.contains(&field.to_lowercase()))
            .cloned()
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(LookupError::UnknownFields { fields: invalid })
        }
    }

    /// Returns the cache directives for an entity type's routes.
    pub fn directives_for(&self, entity_type: &str) -> Option<&CacheDirectives> {
        self.entities
            .get(entity_type)
            .map(|entity| &entity.directives)
    }

    fn entity(&self, entity_type: &str) -> Result<&EntityDefinition, LookupError> {
        self.entities
            .get(entity_type)
            .ok_or_else(|| LookupError::UnknownEntity {
                entity_type: entity_type.to_string(),
            })
    }
}

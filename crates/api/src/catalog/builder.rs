//! Catalog construction.
//!
//! Registration is append-only and happens once at startup; every
//! misconfiguration is a build error, never a per-request one. After
//! `build()` succeeds the catalog is immutable, so request handling needs
//! no locks.

use std::collections::{HashMap, HashSet};

use crate::cache::{CacheDirectives, CacheLocation};

use super::mapping::{PropertyMapping, SourceField};
use super::{CatalogError, EntityCatalog, EntityDefinition};

/// Builder for a single entity type's catalog entry.
#[derive(Debug)]
pub struct EntityDefinitionBuilder {
    name: String,
    fields: Vec<String>,
    mappings: Vec<PropertyMapping>,
    directives: Option<CacheDirectives>,
    user_scoped: bool,
}

impl EntityDefinitionBuilder {
    /// Starts a definition for the given entity type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            mappings: Vec::new(),
            directives: None,
            user_scoped: false,
        }
    }

    /// Declares one public field.
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Declares the entity's public fields.
    pub fn with_fields<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Registers a sortable client field backed by the given source fields.
    pub fn with_sortable(
        mut self,
        client_field: impl Into<String>,
        source_fields: Vec<SourceField>,
    ) -> Self {
        self.mappings
            .push(PropertyMapping::new(client_field, source_fields));
        self
    }

    /// Registers the entity's default sort field.
    ///
    /// Exactly one default must be registered per entity; `build()` fails
    /// otherwise.
    pub fn with_default_sort(
        mut self,
        client_field: impl Into<String>,
        source_fields: Vec<SourceField>,
    ) -> Self {
        self.mappings
            .push(PropertyMapping::new(client_field, source_fields).as_default());
        self
    }

    /// Overrides the catalog's default cache directives for this entity.
    pub fn with_cache_directives(mut self, directives: CacheDirectives) -> Self {
        self.directives = Some(directives);
        self
    }

    /// Marks responses for this entity as varying per user.
    ///
    /// User-scoped entities must not be registered with a `public` cache
    /// location; `build()` enforces this.
    pub fn user_scoped(mut self) -> Self {
        self.user_scoped = true;
        self
    }

    fn build(self, defaults: &CacheDirectives) -> Result<EntityDefinition, CatalogError> {
        let mut seen = HashSet::new();
        let mut default_count = 0usize;

        for mapping in &self.mappings {
            if !seen.insert(mapping.client_field().to_lowercase()) {
                return Err(CatalogError::DuplicateClientField {
                    entity_type: self.name,
                    field: mapping.client_field().to_string(),
                });
            }
            if mapping.source_fields().is_empty() {
                return Err(CatalogError::EmptySourceFields {
                    entity_type: self.name,
                    field: mapping.client_field().to_string(),
                });
            }
            if mapping.is_default_sort() {
                default_count += 1;
            }
        }

        if default_count != 1 {
            return Err(CatalogError::DefaultSortCount {
                entity_type: self.name,
                count: default_count,
            });
        }

        let directives = self.directives.unwrap_or_else(|| defaults.clone());
        if self.user_scoped && directives.location() == CacheLocation::Public {
            return Err(CatalogError::PublicUserScoped {
                entity_type: self.name,
            });
        }

        let fields = self
            .fields
            .iter()
            .map(|field| field.to_lowercase())
            .collect();

        Ok(EntityDefinition {
            name: self.name,
            fields,
            mappings: self.mappings,
            directives,
        })
    }
}

/// Builder for the whole entity catalog.
///
/// # Examples
///
/// ```
/// use coursebook_api::catalog::{EntityCatalogBuilder, EntityDefinitionBuilder, SourceField};
///
/// let catalog = EntityCatalogBuilder::new()
///     .with_entity(
///         EntityDefinitionBuilder::new("courses")
///             .with_fields(["id", "title", "description"])
///             .with_sortable("id", vec![SourceField::new("id")])
///             .with_default_sort("title", vec![SourceField::new("title")]),
///     )
///     .build()
///     .expect("valid catalog");
///
/// assert!(catalog.contains_entity("courses"));
/// ```
#[derive(Debug)]
pub struct EntityCatalogBuilder {
    default_directives: CacheDirectives,
    entities: Vec<EntityDefinitionBuilder>,
}

impl EntityCatalogBuilder {
    /// Starts an empty catalog with default cache directives.
    pub fn new() -> Self {
        Self {
            default_directives: CacheDirectives::default(),
            entities: Vec::new(),
        }
    }

    /// Sets the cache directives used by entities without an override.
    pub fn with_default_directives(mut self, directives: CacheDirectives) -> Self {
        self.default_directives = directives;
        self
    }

    /// Adds an entity definition.
    pub fn with_entity(mut self, entity: EntityDefinitionBuilder) -> Self {
        self.entities.push(entity);
        self
    }

    /// Validates all definitions and builds the immutable catalog.
    ///
    /// # Errors
    ///
    /// Returns the first misconfiguration found; the process should refuse
    /// to serve on any of these.
    pub fn build(self) -> Result<EntityCatalog, CatalogError> {
        let mut entities = HashMap::new();

        for builder in self.entities {
            let definition = builder.build(&self.default_directives)?;
            let name = definition.name.clone();
            if entities.insert(name.clone(), definition).is_some() {
                return Err(CatalogError::DuplicateEntity { entity_type: name });
            }
        }

        Ok(EntityCatalog { entities })
    }
}

impl Default for EntityCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

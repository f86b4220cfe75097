//! The built-in authors/courses catalog.

use crate::cache::{CacheDirectives, CacheLocation};

use super::{CatalogError, EntityCatalog, EntityCatalogBuilder, EntityDefinitionBuilder, SourceField};

/// Builds the authors/courses catalog served by the demo dataset.
///
/// Authors sort by `name` (first then last) by default and expose an `age`
/// sort that runs against `dateOfBirth` with reversed direction, so
/// ascending age lists the oldest birth dates last. Courses default to
/// `title` and carry a longer 240-second cache window; authors inherit the
/// server-wide `defaults` (see `ServerConfig::default_cache_directives`).
pub fn demo_catalog(defaults: CacheDirectives) -> Result<EntityCatalog, CatalogError> {
    EntityCatalogBuilder::new()
        .with_default_directives(defaults)
        .with_entity(
            EntityDefinitionBuilder::new("authors")
                .with_fields(["id", "firstName", "lastName", "dateOfBirth", "mainCategory"])
                .with_sortable("id", vec![SourceField::new("id")])
                .with_sortable("mainCategory", vec![SourceField::new("mainCategory")])
                .with_sortable("age", vec![SourceField::reverted("dateOfBirth")])
                .with_default_sort(
                    "name",
                    vec![SourceField::new("firstName"), SourceField::new("lastName")],
                ),
        )
        .with_entity(
            EntityDefinitionBuilder::new("courses")
                .with_fields(["id", "authorId", "title", "description"])
                .with_sortable("id", vec![SourceField::new("id")])
                .with_default_sort("title", vec![SourceField::new("title")])
                .with_cache_directives(
                    CacheDirectives::new(240, CacheLocation::Private).with_must_revalidate(),
                ),
        )
        .build()
}

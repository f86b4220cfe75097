//! Coursebook Storage Layer
//!
//! This crate provides the storage seam for the Coursebook server. Entities are
//! stored as schemaless JSON documents grouped into named collections, and the
//! query surface is deliberately small: list a page of a collection with
//! already-resolved sort fields, or fetch a single entity by id.
//!
//! Sort fields arrive here fully resolved - the API layer translates
//! client-facing sort names into storage field paths before building a
//! [`ListQuery`], so backends never interpret client vocabulary.
//!
//! # Architecture
//!
//! - [`types`] - Stored entity record and resolved query types
//! - [`error`] - Error types for storage operations
//! - [`core`] - The [`EntityStore`](core::EntityStore) trait
//! - [`backends`] - Backend implementations (in-memory)
//!
//! # Quick Start
//!
//! ```
//! use coursebook_store::backends::MemoryStore;
//! use coursebook_store::core::EntityStore;
//! use coursebook_store::types::{Direction, ListQuery, SortField};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), coursebook_store::StoreError> {
//! let store = MemoryStore::new();
//! store.insert("authors", "a1", json!({"id": "a1", "firstName": "Nancy"}))?;
//! store.insert("authors", "a2", json!({"id": "a2", "firstName": "Berry"}))?;
//!
//! let query = ListQuery::new()
//!     .with_sort(vec![SortField::new("firstName", Direction::Ascending)])
//!     .with_limit(10);
//! let page = store.list("authors", &query).await?;
//! assert_eq!(page.total(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use crate::backends::MemoryStore;
pub use crate::core::EntityStore;
pub use crate::error::{StoreError, StoreResult};
pub use crate::types::{Direction, ListQuery, Page, SortField, StoredEntity};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Core types for stored entities and queries.
//!
//! - [`StoredEntity`] - an entity record with persistence metadata
//! - [`ListQuery`], [`SortField`], [`Direction`] - a resolved list query
//! - [`Page`] - one page of list results

mod query;
mod stored_entity;

pub use query::{Direction, ListQuery, Page, SortField};
pub use stored_entity::StoredEntity;

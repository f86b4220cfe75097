//! Core storage abstractions.
//!
//! This module defines the [`EntityStore`] trait that all backends implement.

mod store;

pub use store::EntityStore;

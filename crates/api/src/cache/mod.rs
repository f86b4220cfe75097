//! Response caching and conditional validation.
//!
//! This module is the freshness side of the API: it renders `Cache-Control`
//! directives from configuration, computes strong entity tags over response
//! payloads, decides Fresh/Stale for conditional requests, and wires all of
//! that into an axum middleware backed by a bounded validator store.
//!
//! - [`directives`] - Cache-Control directive sets
//! - [`etag`] - Entity-tag fingerprinting
//! - [`conditional`] - If-None-Match extraction and the Fresh/Stale decision
//! - [`store`] - Per-URI validator retention
//! - [`layer`] - The response-cache middleware

pub mod conditional;
pub mod directives;
pub mod etag;
pub mod layer;
pub mod store;

pub use conditional::{ConditionalHeaders, ConditionalOutcome, coordinate};
pub use directives::{CacheDirectives, CacheLocation};
pub use etag::EntityTag;
pub use layer::{CacheState, response_cache_layer};
pub use store::{MemoryValidatorStore, ValidatorStore};

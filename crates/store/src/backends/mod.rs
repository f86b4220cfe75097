//! Storage backend implementations.
//!
//! Currently provides a single in-process backend:
//!
//! - [`MemoryStore`] - entities held in memory, suitable for demos and tests

mod memory;

pub use memory::MemoryStore;

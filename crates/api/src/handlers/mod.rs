//! Request handlers.

pub mod health;
pub mod list;
pub mod read;

pub use health::health;
pub use list::list_entities;
pub use read::{ReadParams, read_entity};

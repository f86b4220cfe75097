//! Error types for the storage layer.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The stored content for an entity is not usable.
    #[error("malformed content for {entity_type}/{id}: {message}")]
    Corrupt {
        entity_type: String,
        id: String,
        message: String,
    },

    /// A backend-specific failure (connection loss, query failure, ...).
    #[error("backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Creates a backend error from any displayable cause.
    pub fn backend(cause: impl std::fmt::Display) -> Self {
        StoreError::Backend {
            message: cause.to_string(),
        }
    }
}

/// A convenient Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_display() {
        let err = StoreError::Corrupt {
            entity_type: "authors".to_string(),
            id: "a1".to_string(),
            message: "content is not a JSON object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed content for authors/a1: content is not a JSON object"
        );
    }

    #[test]
    fn test_backend_helper() {
        let err = StoreError::backend("connection reset");
        assert_eq!(err.to_string(), "backend failure: connection reset");
    }
}

//! Error types for the Coursebook API.
//!
//! This module defines all per-request error types, with automatic
//! conversion to `application/problem+json` responses.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Problem Type |
//! |-------|-------------|--------------|
//! | UnknownSortFields | 400 | unknown-sort-field |
//! | UnknownShapeFields | 422 | unknown-shape-field |
//! | MalformedQuery | 400 | malformed-query |
//! | UnknownEntityType | 404 | unknown-entity-type |
//! | NotFound | 404 | not-found |
//! | Internal | 500 | internal-fault |
//!
//! Internal faults never leak their cause to the client; the real message
//! is logged with the request's trace id and the response carries a fixed
//! detail string.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursebook_store::StoreError;
use tracing::error;

use crate::responses::problem::ProblemDetails;

/// Detail string for internal faults; deliberately reveals nothing.
pub const INTERNAL_FAULT_DETAIL: &str = "An unexpected fault happened. Try again later.";

/// The semantic error kinds the API produces.
#[derive(Debug)]
pub enum ApiErrorKind {
    /// One or more requested sort fields are not mapped (HTTP 400).
    UnknownSortFields {
        /// The entity type that was queried.
        entity_type: String,
        /// Every unmapped sort field name.
        fields: Vec<String>,
    },

    /// One or more requested shape fields are not declared (HTTP 422).
    UnknownShapeFields {
        /// The entity type that was queried.
        entity_type: String,
        /// Every undeclared field name.
        fields: Vec<String>,
    },

    /// A query expression or pagination parameter is unparseable (HTTP 400).
    MalformedQuery {
        /// What failed to parse.
        message: String,
    },

    /// The route names no registered entity type (HTTP 404).
    UnknownEntityType {
        /// The unregistered entity type.
        entity_type: String,
    },

    /// Entity not found (HTTP 404).
    NotFound {
        /// The entity type.
        entity_type: String,
        /// The entity id.
        id: String,
    },

    /// Internal server error (HTTP 500); cause is logged, never emitted.
    Internal {
        /// The internal cause, for logging only.
        message: String,
    },
}

/// A per-request error, carrying the request path and trace id for the
/// problem payload.
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    instance: String,
    trace_id: String,
}

impl ApiError {
    /// Wraps an error kind with its request context.
    pub fn new(kind: ApiErrorKind, instance: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            kind,
            instance: instance.into(),
            trace_id: trace_id.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::UnknownSortFields { entity_type, fields } => {
                write!(
                    f,
                    "Unknown sort fields for {}: {}",
                    entity_type,
                    fields.join(", ")
                )
            }
            ApiErrorKind::UnknownShapeFields { entity_type, fields } => {
                write!(
                    f,
                    "Unknown shape fields for {}: {}",
                    entity_type,
                    fields.join(", ")
                )
            }
            ApiErrorKind::MalformedQuery { message } => {
                write!(f, "Malformed query: {}", message)
            }
            ApiErrorKind::UnknownEntityType { entity_type } => {
                write!(f, "Unknown entity type: {}", entity_type)
            }
            ApiErrorKind::NotFound { entity_type, id } => {
                write!(f, "Entity not found: {}/{}", entity_type, id)
            }
            ApiErrorKind::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let problem = match &self.kind {
            ApiErrorKind::UnknownSortFields { entity_type, fields } => ProblemDetails::new(
                "unknown-sort-field",
                "One or more sort fields are invalid.",
                StatusCode::BAD_REQUEST,
                format!(
                    "The following sort fields are not valid for '{}': {}.",
                    entity_type,
                    fields.join(", ")
                ),
            )
            .with_invalid_fields(fields.clone()),

            ApiErrorKind::UnknownShapeFields { entity_type, fields } => ProblemDetails::new(
                "unknown-shape-field",
                "One or more requested fields are invalid.",
                StatusCode::UNPROCESSABLE_ENTITY,
                format!(
                    "The following fields are not valid for '{}': {}.",
                    entity_type,
                    fields.join(", ")
                ),
            )
            .with_invalid_fields(fields.clone()),

            ApiErrorKind::MalformedQuery { message } => ProblemDetails::new(
                "malformed-query",
                "The query string could not be parsed.",
                StatusCode::BAD_REQUEST,
                message.clone(),
            ),

            ApiErrorKind::UnknownEntityType { entity_type } => ProblemDetails::new(
                "unknown-entity-type",
                "The requested entity type does not exist.",
                StatusCode::NOT_FOUND,
                format!("No entity type '{}' is registered.", entity_type),
            ),

            ApiErrorKind::NotFound { entity_type, id } => ProblemDetails::new(
                "not-found",
                "The requested entity does not exist.",
                StatusCode::NOT_FOUND,
                format!("Entity {}/{} was not found.", entity_type, id),
            ),

            ApiErrorKind::Internal { message } => {
                error!(
                    trace_id = %self.trace_id,
                    instance = %self.instance,
                    cause = %message,
                    "Internal fault while building response"
                );
                ProblemDetails::new(
                    "internal-fault",
                    "An internal fault occurred.",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_FAULT_DETAIL,
                )
            }
        };

        problem
            .with_instance(self.instance)
            .with_trace_id(self.trace_id)
            .into_response()
    }
}

impl From<StoreError> for ApiErrorKind {
    fn from(err: StoreError) -> Self {
        ApiErrorKind::Internal {
            message: err.to_string(),
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sort_fields_display() {
        let kind = ApiErrorKind::UnknownSortFields {
            entity_type: "authors".to_string(),
            fields: vec!["bogus".to_string(), "nope".to_string()],
        };
        assert_eq!(
            kind.to_string(),
            "Unknown sort fields for authors: bogus, nope"
        );
    }

    #[test]
    fn test_not_found_display() {
        let kind = ApiErrorKind::NotFound {
            entity_type: "courses".to_string(),
            id: "c1".to_string(),
        };
        assert_eq!(kind.to_string(), "Entity not found: courses/c1");
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let kind: ApiErrorKind = StoreError::backend("connection reset").into();
        assert!(matches!(kind, ApiErrorKind::Internal { .. }));
    }

    #[tokio::test]
    async fn test_into_response_status_codes() {
        let cases = vec![
            (
                ApiErrorKind::UnknownSortFields {
                    entity_type: "authors".to_string(),
                    fields: vec!["bogus".to_string()],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiErrorKind::UnknownShapeFields {
                    entity_type: "courses".to_string(),
                    fields: vec!["bogus".to_string()],
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiErrorKind::MalformedQuery {
                    message: "page must be a positive integer".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiErrorKind::UnknownEntityType {
                    entity_type: "ships".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ApiErrorKind::Internal {
                    message: "secret backend detail".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (kind, expected) in cases {
            let response = ApiError::new(kind, "/authors", "trace-1").into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_detail_does_not_leak() {
        let error = ApiError::new(
            ApiErrorKind::Internal {
                message: "secret backend detail".to_string(),
            },
            "/authors",
            "trace-1",
        );
        let response = error.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["detail"], INTERNAL_FAULT_DETAIL);
        assert!(!bytes.windows(6).any(|w| w == b"secret"));
    }
}

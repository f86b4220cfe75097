//! Single-entity read handler.
//!
//! `GET /{entity_type}/{id}` with optional field shaping.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use coursebook_store::EntityStore;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::LookupError;
use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::extractors::RequestMeta;
use crate::responses::apply_shape;
use crate::state::AppState;

/// Query parameters for a single-entity read.
#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    /// Comma-separated field projection.
    pub fields: Option<String>,
}

/// Reads one entity by id, optionally shaped.
pub async fn read_entity<S: EntityStore>(
    State(state): State<AppState<S>>,
    Path((entity_type, id)): Path<(String, String)>,
    Query(params): Query<ReadParams>,
    meta: RequestMeta,
) -> ApiResult<Response> {
    let fail = |kind: ApiErrorKind| ApiError::new(kind, &meta.instance, &meta.trace_id);

    if !state.catalog().contains_entity(&entity_type) {
        return Err(fail(ApiErrorKind::UnknownEntityType {
            entity_type: entity_type.clone(),
        }));
    }

    let shape_fields: Vec<String> = params
        .fields
        .as_deref()
        .map(|expr| {
            expr.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    state
        .catalog()
        .validate_shape(&entity_type, &shape_fields)
        .map_err(|err| {
            fail(match err {
                LookupError::UnknownFields { fields } => ApiErrorKind::UnknownShapeFields {
                    entity_type: entity_type.clone(),
                    fields,
                },
                LookupError::UnknownEntity { entity_type } => {
                    ApiErrorKind::UnknownEntityType { entity_type }
                }
            })
        })?;

    let entity = state
        .store()
        .get(&entity_type, &id)
        .await
        .map_err(|err| fail(err.into()))?
        .ok_or_else(|| {
            fail(ApiErrorKind::NotFound {
                entity_type: entity_type.clone(),
                id: id.clone(),
            })
        })?;

    debug!(entity = %entity.url(), "read entity");

    Ok(Json(apply_shape(entity.content(), &shape_fields)).into_response())
}

//! List handler.
//!
//! `GET /{entity_type}` with sorting, shaping, filtering, and pagination.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use coursebook_store::{EntityStore, ListQuery};
use serde_json::Value;
use tracing::debug;

use crate::catalog::LookupError;
use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::extractors::{ListParams, RawListParams, RequestMeta};
use crate::responses::{PAGINATION_HEADER, PageLinkBuilder, PaginationMeta, apply_shape};
use crate::state::AppState;

/// Lists a page of entities.
///
/// Sort keys resolve through the catalog's property mappings; shape fields
/// are validated against the declared field set before the store is
/// touched. The response body is the shaped page and the `X-Pagination`
/// header carries the window metadata with previous/next links.
pub async fn list_entities<S: EntityStore>(
    State(state): State<AppState<S>>,
    Path(entity_type): Path<String>,
    Query(raw): Query<RawListParams>,
    meta: RequestMeta,
) -> ApiResult<Response> {
    let fail = |kind: ApiErrorKind| ApiError::new(kind, &meta.instance, &meta.trace_id);

    if !state.catalog().contains_entity(&entity_type) {
        return Err(fail(ApiErrorKind::UnknownEntityType {
            entity_type: entity_type.clone(),
        }));
    }

    let params = ListParams::parse(&raw, state.default_page_size(), state.max_page_size())
        .map_err(&fail)?;

    let sort = if params.sort_keys.is_empty() {
        state
            .catalog()
            .default_sort(&entity_type)
            .map_err(|err| fail(sort_error(&entity_type, err)))?
    } else {
        state
            .catalog()
            .resolve_sort(&entity_type, &params.sort_keys)
            .map_err(|err| fail(sort_error(&entity_type, err)))?
    };

    state
        .catalog()
        .validate_shape(&entity_type, &params.shape_fields)
        .map_err(|err| fail(shape_error(&entity_type, err)))?;

    let mut query = ListQuery::new()
        .with_sort(sort)
        .with_offset(params.offset())
        .with_limit(params.page_size);
    if let Some(filter) = &params.filter {
        query = query.with_filter(filter);
    }

    let page = state
        .store()
        .list(&entity_type, &query)
        .await
        .map_err(|err| fail(err.into()))?;

    debug!(
        entity_type = %entity_type,
        page = params.page,
        page_size = params.page_size,
        total = page.total(),
        "listed entities"
    );

    let shaped: Vec<Value> = page
        .items()
        .iter()
        .map(|entity| apply_shape(entity.content(), &params.shape_fields))
        .collect();

    let mut pagination = PaginationMeta::new(page.total(), params.page, params.page_size);
    let links = PageLinkBuilder::new(state.base_url(), &entity_type, params.page_size)
        .with_sort(params.raw_sort.as_deref())
        .with_fields(params.raw_fields.as_deref())
        .with_filter(params.filter.as_deref());
    if pagination.has_previous() {
        if let Some(link) = links.link_for(params.page - 1) {
            pagination = pagination.with_previous_link(link);
        }
    }
    if pagination.has_next() {
        if let Some(link) = links.link_for(params.page + 1) {
            pagination = pagination.with_next_link(link);
        }
    }

    let header = HeaderValue::from_str(&pagination.header_value()).map_err(|err| {
        fail(ApiErrorKind::Internal {
            message: format!("pagination header not representable: {err}"),
        })
    })?;

    let mut response = Json(shaped).into_response();
    response.headers_mut().insert(PAGINATION_HEADER, header);
    Ok(response)
}

fn sort_error(entity_type: &str, err: LookupError) -> ApiErrorKind {
    match err {
        LookupError::UnknownFields { fields } => ApiErrorKind::UnknownSortFields {
            entity_type: entity_type.to_string(),
            fields,
        },
        LookupError::UnknownEntity { entity_type } => {
            ApiErrorKind::UnknownEntityType { entity_type }
        }
    }
}

fn shape_error(entity_type: &str, err: LookupError) -> ApiErrorKind {
    match err {
        LookupError::UnknownFields { fields } => ApiErrorKind::UnknownShapeFields {
            entity_type: entity_type.to_string(),
            fields,
        },
        LookupError::UnknownEntity { entity_type } => {
            ApiErrorKind::UnknownEntityType { entity_type }
        }
    }
}

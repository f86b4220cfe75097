//! Response-cache middleware.
//!
//! Sits in front of the router and implements the conditional-validation
//! flow for GET responses: the handler runs, the candidate body is
//! fingerprinted, and the supplied `If-None-Match` token is compared
//! against the freshly computed tag. Equal emits 304 with an empty body,
//! different emits the full 200. Both outcomes re-assert `ETag` and
//! `Cache-Control` so downstream caches refresh their freshness lifetime.
//!
//! Freshness is always decided against the recomputed tag, never against a
//! previously stored one, so a change in the underlying data is never
//! masked by a token issued before the change. The validator store only
//! records the most recently issued token per URI, and that record is
//! dropped when the route stops producing a representation.
//!
//! Routes whose entity type is not in the catalog pass through untouched;
//! `no-store` routes skip the validator store entirely.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

use crate::catalog::EntityCatalog;

use super::conditional::{ConditionalHeaders, ConditionalOutcome, coordinate};
use super::directives::CacheDirectives;
use super::etag::EntityTag;
use super::store::ValidatorStore;

/// Largest response body the layer will buffer for fingerprinting.
const MAX_FINGERPRINT_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Shared cache state for the middleware.
#[derive(Clone)]
pub struct CacheState {
    /// Entity catalog, consulted for per-route cache policy.
    pub catalog: Arc<EntityCatalog>,
    /// Validator store keyed by request URI.
    pub store: Arc<dyn ValidatorStore>,
}

impl CacheState {
    /// Creates cache state from a catalog and validator store.
    pub fn new(catalog: Arc<EntityCatalog>, store: Arc<dyn ValidatorStore>) -> Self {
        Self { catalog, store }
    }
}

/// Middleware implementing conditional response validation.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn response_cache_layer(
    State(cache): State<CacheState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Only GET responses carry validators
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let Some(directives) = route_directives(&cache.catalog, request.uri().path()) else {
        return next.run(request).await;
    };
    let directives = directives.clone();

    if directives.is_no_store() {
        let response = next.run(request).await;
        return assert_no_store(response, &directives);
    }

    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let supplied = ConditionalHeaders::from_headers(request.headers())
        .if_none_match()
        .map(String::from);

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        // The route no longer produces a representation for this URI.
        cache.store.invalidate(&uri);
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_FINGERPRINT_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(%error, "Failed to buffer response body for fingerprinting");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let tag = EntityTag::compute(&bytes, &directives);
    if let Some(previous) = cache.store.get(&uri) {
        if previous != tag.as_str() {
            debug!("Representation changed since the last issued validator");
        }
    }
    let ttl = Duration::from_secs(u64::from(directives.max_age_seconds()));
    cache.store.put(&uri, tag.as_str(), ttl);

    match coordinate(supplied.as_deref(), &tag) {
        ConditionalOutcome::Fresh => {
            debug!(outcome = "fresh", "Serving 304 after recompute");
            not_modified(tag.as_str(), &directives)
        }
        ConditionalOutcome::Stale => {
            debug!(outcome = "stale", "Serving full response");
            set_validation_headers(&mut parts.headers, tag.as_str(), &directives);
            Response::from_parts(parts, Body::from(bytes))
        }
    }
}

/// Looks up the cache directives for a request path's entity type.
fn route_directives<'a>(catalog: &'a EntityCatalog, path: &str) -> Option<&'a CacheDirectives> {
    let entity_type = path.trim_start_matches('/').split('/').next()?;
    catalog.directives_for(entity_type)
}

/// Builds a 304 response carrying the validator and directives.
fn not_modified(token: &str, directives: &CacheDirectives) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    set_validation_headers(response.headers_mut(), token, directives);
    response
}

/// Sets `ETag` and `Cache-Control` on a response.
fn set_validation_headers(
    headers: &mut axum::http::HeaderMap,
    token: &str,
    directives: &CacheDirectives,
) {
    if let Ok(value) = HeaderValue::from_str(token) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&directives.header_value()) {
        headers.insert(header::CACHE_CONTROL, value);
    }
}

/// Marks a successful response as non-cacheable.
fn assert_no_store(response: Response, directives: &CacheDirectives) -> Response {
    if response.status() != StatusCode::OK {
        return response;
    }
    let mut response = response;
    if let Ok(value) = HeaderValue::from_str(&directives.header_value()) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    response
}

//! # coursebook-api - Cache-validated course data API
//!
//! This crate implements the HTTP layer of the Coursebook server: paged,
//! sorted, shaped reads over schemaless entity collections, fronted by a
//! response-validation cache that answers repeat reads with
//! `304 Not Modified`.
//!
//! ## Features
//!
//! - **Conditional validation**: strong `ETag` generation over the response
//!   payload and cache policy, `If-None-Match` coordination against the
//!   freshly computed tag, and a per-URI record of the most recently issued
//!   validator
//! - **Cache policy**: per-entity `Cache-Control` directives declared in the
//!   catalog, with server-wide defaults
//! - **Client-driven sorting**: client-facing sort fields resolve through
//!   catalog mappings to one or more source fields, including reversed-order
//!   mappings (e.g. `age` over `dateOfBirth`)
//! - **Field shaping**: `?fields=` projections validated against the entity's
//!   declared field set
//! - **Pagination**: 1-based page windows with an `X-Pagination` metadata
//!   header carrying previous/next links
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coursebook_api::{ServerConfig, catalog::demo_catalog, create_app_with_config};
//! use coursebook_store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let store = MemoryStore::new();
//!     let catalog = demo_catalog(config.default_cache_directives())?;
//!     let app = create_app_with_config(store, catalog, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/[entity_type]?sort&fields&q&page&pageSize` |
//! | read | GET | `/[entity_type]/[id]?fields` |
//! | health | GET | `/health` |
//!
//! ## Error Handling
//!
//! All errors are returned as `application/problem+json` payloads with
//! appropriate HTTP status codes:
//!
//! | HTTP Status | Problem Type | Description |
//! |-------------|--------------|-------------|
//! | 400 | unknown-sort-field | Sort field not mapped for the entity |
//! | 400 | malformed-query | Unparseable query parameter |
//! | 404 | unknown-entity-type | Entity type not registered |
//! | 404 | not-found | Entity id not found |
//! | 422 | unknown-shape-field | Shape field not declared for the entity |
//! | 500 | internal-fault | Internal error (cause logged, never emitted) |
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`catalog`] - Entity registry: sort mappings, field sets, cache policy
//! - [`cache`] - Validators, directives, and the response-cache middleware
//! - [`state`] - Application state (store, catalog, configuration)
//! - [`extractors`] - Query-parameter and request-metadata extraction
//! - [`handlers`] - HTTP request handlers
//! - [`responses`] - Problem payloads, field shaping, pagination
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use cache::{CacheDirectives, CacheLocation, EntityTag};
pub use catalog::{EntityCatalog, demo_catalog};
pub use config::ServerConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use state::AppState;

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursebook_store::EntityStore;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as CorsAny, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::cache::{CacheState, MemoryValidatorStore, response_cache_layer};
use crate::error::INTERNAL_FAULT_DETAIL;
use crate::responses::ProblemDetails;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(store: S, catalog: EntityCatalog) -> Router
where
    S: EntityStore + Send + Sync + 'static,
{
    create_app_with_config(store, catalog, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// This function sets up the complete API: routes, the response-cache
/// middleware, and the outer middleware stack (panic boundary, request id,
/// tracing, timeout, CORS).
pub fn create_app_with_config<S>(store: S, catalog: EntityCatalog, config: ServerConfig) -> Router
where
    S: EntityStore + Send + Sync + 'static,
{
    info!(
        "Creating API server with backend: {}",
        store.backend_name()
    );

    // Create application state
    let state = AppState::new(Arc::new(store), catalog, config.clone());
    let cache_state = CacheState::new(
        state.catalog_arc(),
        Arc::new(MemoryValidatorStore::new(config.validator_cache_capacity)),
    );

    // Build the router; the response cache wraps it directly so every other
    // layer sees the post-validation response.
    let router = routing::create_routes(state).layer(axum::middleware::from_fn_with_state(
        cache_state,
        response_cache_layer,
    ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                std::time::Duration::from_secs(config.request_timeout),
            )),
    );

    // Request id assignment must precede tracing so spans carry the id
    let router = if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    };

    // Outermost: panics become opaque 500 problem payloads
    router.layer(CatchPanicLayer::custom(handle_panic))
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(CorsAny);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(CorsAny);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(CorsAny);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Converts a handler panic into an opaque 500 problem payload.
///
/// The panic message is logged, never emitted to the client.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "panic payload of unknown type"
    };
    error!(%message, "Handler panicked");

    ProblemDetails::new(
        "internal-fault",
        "An internal fault occurred.",
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_FAULT_DETAIL,
    )
    .into_response()
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coursebook_api={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

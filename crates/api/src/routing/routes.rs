//! Route configuration.
//!
//! Defines the HTTP routes for the Coursebook API.

use axum::{Router, routing::get};
use coursebook_store::EntityStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
///
/// ## Collection-level
/// - `GET /{entity_type}` - List with sorting, shaping, filtering, pagination
///
/// ## Instance-level
/// - `GET /{entity_type}/{id}` - Read with optional field shaping
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: EntityStore + Send + Sync + 'static,
{
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health::<S>))
        // Collection-level routes
        .route("/{entity_type}", get(handlers::list_entities::<S>))
        // Instance-level routes
        .route("/{entity_type}/{id}", get(handlers::read_entity::<S>))
        // State
        .with_state(state)
}

//! Health check handler.

use axum::{Json, extract::State, response::IntoResponse};
use coursebook_store::EntityStore;
use serde_json::json;

use crate::state::AppState;

/// Reports service liveness, the storage backend, and the registered
/// entity types. Not routed through the response cache.
pub async fn health<S: EntityStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let mut entities: Vec<&str> = state.catalog().entity_types().collect();
    entities.sort_unstable();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.store().backend_name(),
        "entities": entities,
    }))
}

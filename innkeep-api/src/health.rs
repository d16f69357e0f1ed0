use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Reports, never fails: both flags false just means the supervisors
/// have not connected yet.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = state.bookings.is_connected().await && state.customers.is_connected().await;
    let queue = state.events.is_ready();

    Json(json!({
        "status": "ok",
        "database": database,
        "queue": queue,
    }))
}

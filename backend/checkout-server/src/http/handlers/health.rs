use axum::{extract::State, Json};
use serde_json::json;

use crate::http::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "checkout-server",
        "gateway": state.gateway.id(),
    }))
}

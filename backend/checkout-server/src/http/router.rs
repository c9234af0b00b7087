use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/payments", post(handlers::payments::create_payment))
        .route(
            "/payments/{merchant_transaction_id}/status",
            get(handlers::payments::payment_status),
        )
        .route(
            "/webhooks/phonepe",
            post(handlers::webhooks::phonepe_webhook),
        )
        .with_state(state)
}

use axum::{
    extract::{Path, State},
    Json,
};
use domain_types::connector_types::{PaymentRequest, PaymentResult};

use crate::http::{state::AppState, utils::ValidatedJson};

/// Processor outcomes, including rejections, are returned as a 200 with
/// `succeeded = false`; only a malformed body is an HTTP error.
pub async fn create_payment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PaymentRequest>,
) -> Json<PaymentResult> {
    Json(state.gateway.create_payment(payload).await)
}

pub async fn payment_status(
    State(state): State<AppState>,
    Path(merchant_transaction_id): Path<String>,
) -> Json<PaymentResult> {
    Json(state.gateway.verify_payment(&merchant_transaction_id).await)
}

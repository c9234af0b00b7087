use axum::{extract::State, http::HeaderMap, Json};
use connector_integration::connectors::phonepe::headers::X_VERIFY;
use domain_types::connector_types::PaymentResult;
use external_services::Tag;
use serde::Serialize;

use crate::http::{state::AppState, utils::ValidatedJson};

#[derive(Debug, Serialize)]
pub struct WebhookAcknowledgement {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentResult>,
}

/// Always answers 200 so the processor does not retry a callback that
/// failed authentication.
pub async fn phonepe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<serde_json::Value>,
) -> Json<WebhookAcknowledgement> {
    let supplied_checksum = headers
        .get(X_VERIFY)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if supplied_checksum.is_empty() || !state.gateway.process_webhook(&payload, supplied_checksum)
    {
        tracing::warn!(
            tag = ?Tag::IncomingWebhook,
            checksum_present = !supplied_checksum.is_empty(),
            "webhook rejected"
        );
        return Json(WebhookAcknowledgement {
            accepted: false,
            payment: None,
        });
    }

    let payment = state
        .gateway
        .decode_webhook_event(&payload)
        .inspect_err(|report| {
            tracing::warn!(tag = ?Tag::IncomingWebhook, error = ?report, "webhook body not decodable");
        })
        .ok();

    tracing::info!(
        tag = ?Tag::IncomingWebhook,
        merchant_transaction_id = ?payment
            .as_ref()
            .and_then(|result| result.details.as_ref())
            .map(|details| details.merchant_transaction_id.as_str()),
        "webhook accepted"
    );

    Json(WebhookAcknowledgement {
        accepted: true,
        payment,
    })
}

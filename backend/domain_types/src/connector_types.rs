use common_utils::types::MinorUnit;
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

use crate::payment_method_data::PaymentInstrument;

/// Generic code for a create attempt that never got a processor verdict
pub const PAYMENT_ERROR_CODE: &str = "PAYMENT_ERROR";
/// Generic code for a status check that never got a processor verdict
pub const VERIFICATION_ERROR_CODE: &str = "VERIFICATION_ERROR";
/// Code for a request rejected before it reaches the processor
pub const INVALID_AMOUNT_CODE: &str = "INVALID_AMOUNT";
/// Code for a merchant transaction id the processor would not accept
pub const INVALID_TRANSACTION_ID_CODE: &str = "INVALID_TRANSACTION_ID";

/// One checkout attempt. A retry needs a new `merchant_order_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount_minor_units: MinorUnit,
    /// Generated when absent
    #[serde(default)]
    pub merchant_order_id: Option<String>,
    pub payer_id: String,
    pub redirect_url: url::Url,
    pub callback_url: url::Url,
    #[serde(default)]
    pub payer_mobile: Option<Secret<String>>,
    /// Hosted page when absent
    #[serde(default)]
    pub instrument: Option<PaymentInstrument>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub merchant_id: String,
    pub merchant_transaction_id: String,
    pub processor_transaction_id: Option<String>,
    pub amount_minor_units: Option<MinorUnit>,
    pub state: PaymentState,
    pub instrument_used: Option<String>,
    pub utr_reference: Option<String>,
    /// Where to send the payer next, present on a successful create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}

/// Outcome of a gateway call. Transport failures and processor rejections both land
/// here with `succeeded == false`; only `status_code`/`message` tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub succeeded: bool,
    pub status_code: String,
    pub message: String,
    pub details: Option<PaymentDetails>,
}

impl PaymentResult {
    pub fn failure(status_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            status_code: status_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payment_request_defaults() {
        let request: PaymentRequest = serde_json::from_value(json!({
            "amountMinorUnits": 49900,
            "payerId": "user-42",
            "redirectUrl": "https://astro.example/payment/return",
            "callbackUrl": "https://astro.example/api/payment/webhook"
        }))
        .expect("valid request");

        assert_eq!(request.amount_minor_units, MinorUnit::new(49900));
        assert!(request.merchant_order_id.is_none());
        assert!(request.payer_mobile.is_none());
        assert!(request.instrument.is_none());
    }

    #[test]
    fn test_payment_state_wire_names() {
        assert_eq!(
            serde_json::to_value(PaymentState::Completed).ok(),
            Some(json!("COMPLETED"))
        );
        assert_eq!("FAILED".parse::<PaymentState>().ok(), Some(PaymentState::Failed));
    }

    #[test]
    fn test_failure_has_no_details() {
        let result = PaymentResult::failure(PAYMENT_ERROR_CODE, "connection refused");
        assert!(!result.succeeded);
        assert_eq!(result.status_code, "PAYMENT_ERROR");
        assert!(result.details.is_none());
    }
}

use std::sync::Arc;

use common_utils::errors::CustomResult;
use domain_types::{
    connector_types::{PaymentRequest, PaymentResult},
    errors::ConnectorError,
};

/// Pairs a processor answer with the call it belongs to.
pub struct ResponseRouterData<Response, RouterData> {
    pub response: Response,
    pub router_data: RouterData,
    pub http_code: u16,
}

pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// A processor integration. None of the operations fail: every failure comes back
/// as an unsuccessful `PaymentResult` or a rejected webhook.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn id(&self) -> &'static str;

    /// Submit one checkout attempt.
    async fn create_payment(&self, request: PaymentRequest) -> PaymentResult;

    /// Ask the processor for the current state of an attempt.
    async fn verify_payment(&self, merchant_transaction_id: &str) -> PaymentResult;

    /// `true` only when `supplied_checksum` authenticates `payload`.
    fn process_webhook(&self, payload: &serde_json::Value, supplied_checksum: &str) -> bool;

    /// Read the payment outcome out of an authenticated callback.
    fn decode_webhook_event(
        &self,
        payload: &serde_json::Value,
    ) -> CustomResult<PaymentResult, ConnectorError>;
}

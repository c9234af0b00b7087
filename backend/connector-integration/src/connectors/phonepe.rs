pub mod constants;
pub mod headers;
pub mod transformers;

use std::sync::Arc;

use common_utils::{
    consts::MERCHANT_TRANSACTION_ID_PREFIX,
    crypto,
    errors::CustomResult,
    ext_traits::BytesExt,
    generate_time_ordered_id,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    connector_types::{
        PaymentRequest, PaymentResult, INVALID_AMOUNT_CODE, INVALID_TRANSACTION_ID_CODE,
        PAYMENT_ERROR_CODE, VERIFICATION_ERROR_CODE,
    },
    errors,
    router_response_types::Response,
    types::PhonepeConfig,
};
use error_stack::ResultExt;
use external_services::ConnectorTransport;
use hyperswitch_masking::{Mask, Maskable, PeekInterface};
use serde_json::json;

use self::transformers::{
    PhonepeErrorResponse, PhonepePaymentsRequest, PhonepePaymentsResponse, PhonepeRouterData,
    PhonepeSyncRequest, PhonepeSyncResponse, PhonepeSyncRouterData,
};
use crate::types::{PaymentGateway, ResponseRouterData};

/// PhonePe standard checkout. Holds only immutable configuration, so one instance
/// serves any number of concurrent calls.
#[derive(Clone)]
pub struct Phonepe {
    config: PhonepeConfig,
    transport: Arc<dyn ConnectorTransport>,
}

impl std::fmt::Debug for Phonepe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Phonepe")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Phonepe {
    pub fn new(config: PhonepeConfig, transport: Arc<dyn ConnectorTransport>) -> Self {
        Self { config, transport }
    }

    pub fn connector_base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn build_headers(&self, checksum: String) -> Vec<(String, Maskable<String>)> {
        vec![
            (
                headers::CONTENT_TYPE.to_string(),
                constants::APPLICATION_JSON.to_string().into(),
            ),
            (
                headers::ACCEPT.to_string(),
                constants::APPLICATION_JSON.to_string().into(),
            ),
            (headers::X_VERIFY.to_string(), checksum.into_masked()),
        ]
    }

    fn build_pay_request(&self, connector_req: PhonepePaymentsRequest) -> Request {
        let checksum = connector_req.checksum.clone();
        RequestBuilder::new()
            .method(Method::Post)
            .url(&format!(
                "{}{}",
                self.connector_base_url(),
                constants::API_PAY_ENDPOINT
            ))
            .attach_default_headers()
            .headers(self.build_headers(checksum))
            .set_body(RequestContent::Json(Box::new(connector_req)))
            .build()
    }

    fn build_sync_request(&self, connector_req: PhonepeSyncRequest) -> Request {
        let mut headers = self.build_headers(connector_req.checksum);
        headers.push((
            headers::X_MERCHANT_ID.to_string(),
            self.config.merchant_id.peek().to_string().into(),
        ));

        RequestBuilder::new()
            .method(Method::Get)
            .url(&format!(
                "{}{}",
                self.connector_base_url(),
                connector_req.api_path
            ))
            .attach_default_headers()
            .headers(headers)
            .build()
    }

    /// Non-2xx answers keep the processor's own code/message when the body is the
    /// usual envelope; anything else counts as a failed call.
    fn build_error_response(res: Response) -> error_stack::Report<errors::ConnectorError> {
        let parsed: CustomResult<PhonepeErrorResponse, common_utils::ParsingError> =
            res.response.parse_struct("PhonePe ErrorResponse");
        match parsed {
            Ok(error_response) => error_stack::report!(errors::ConnectorError::FailedAtConnector {
                code: error_response.code,
                message: error_response.message,
            }),
            Err(report) => {
                let raw_response = String::from_utf8_lossy(&res.response).to_string();
                report
                    .change_context(errors::ConnectorError::TransportFailure)
                    .attach_printable(format!(
                        "unparseable {} response from PhonePe: {raw_response}",
                        res.status_code
                    ))
            }
        }
    }

    async fn try_create_payment(
        &self,
        request: &PaymentRequest,
        merchant_transaction_id: &str,
    ) -> CustomResult<PaymentResult, errors::ConnectorError> {
        request.amount_minor_units.ensure_positive().map_err(|err| {
            let message = err.current_context().to_string();
            err.change_context(errors::ConnectorError::InvalidAmount { message })
        })?;
        check_transaction_id(merchant_transaction_id)?;

        let router_data = PhonepeRouterData {
            config: &self.config,
            merchant_transaction_id,
            request,
        };
        let connector_req = PhonepePaymentsRequest::try_from(&router_data)?;

        let response = self
            .transport
            .send(self.build_pay_request(connector_req), "pay")
            .await
            .change_context(errors::ConnectorError::TransportFailure)?
            .map_err(Self::build_error_response)?;

        let pay_response: PhonepePaymentsResponse = response
            .response
            .parse_struct("PhonepePaymentsResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;

        PaymentResult::try_from(ResponseRouterData {
            response: pay_response,
            router_data: &router_data,
            http_code: response.status_code,
        })
    }

    async fn try_verify_payment(
        &self,
        merchant_transaction_id: &str,
    ) -> CustomResult<PaymentResult, errors::ConnectorError> {
        check_transaction_id(merchant_transaction_id)?;

        let router_data = PhonepeSyncRouterData {
            config: &self.config,
            merchant_transaction_id: Some(merchant_transaction_id),
        };
        let connector_req = PhonepeSyncRequest::try_from(&router_data)?;

        let response = self
            .transport
            .send(self.build_sync_request(connector_req), "status")
            .await
            .change_context(errors::ConnectorError::TransportFailure)?
            .map_err(Self::build_error_response)?;

        let sync_response: PhonepeSyncResponse = response
            .response
            .parse_struct("PhonepeSyncResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;

        PaymentResult::try_from(ResponseRouterData {
            response: sync_response,
            router_data: &router_data,
            http_code: response.status_code,
        })
    }
}

fn check_transaction_id(
    merchant_transaction_id: &str,
) -> CustomResult<(), errors::ConnectorError> {
    transformers::validate_merchant_transaction_id(merchant_transaction_id).map_err(|err| {
        let message = err.current_context().to_string();
        err.change_context(errors::ConnectorError::InvalidTransactionId { message })
    })
}

/// Turns a failed call into the result handed back to callers.
fn fold_into_payment_result(
    report: error_stack::Report<errors::ConnectorError>,
    generic_code: &str,
) -> PaymentResult {
    match report.current_context() {
        errors::ConnectorError::InvalidAmount { message } => {
            tracing::warn!(error = ?report, "rejected payment amount");
            PaymentResult::failure(INVALID_AMOUNT_CODE, message.clone())
        }
        errors::ConnectorError::InvalidTransactionId { message } => {
            tracing::warn!(error = ?report, "rejected merchant transaction id");
            PaymentResult::failure(INVALID_TRANSACTION_ID_CODE, message.clone())
        }
        errors::ConnectorError::FailedAtConnector { code, message } => {
            tracing::warn!(%code, %message, "PhonePe rejected the request");
            PaymentResult::failure(code.clone(), message.clone())
        }
        other => {
            external_services::error_log(
                "PHONEPE_CALL_FAILED",
                &json!({ "code": generic_code, "error": format!("{report:?}") }),
            );
            PaymentResult::failure(generic_code, other.to_string())
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for Phonepe {
    fn id(&self) -> &'static str {
        "phonepe"
    }

    #[tracing::instrument(
        name = "phonepe_create_payment",
        skip_all,
        fields(
            merchant_transaction_id = tracing::field::Empty,
            amount = %request.amount_minor_units
        )
    )]
    async fn create_payment(&self, request: PaymentRequest) -> PaymentResult {
        let merchant_transaction_id = request
            .merchant_order_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generate_time_ordered_id(MERCHANT_TRANSACTION_ID_PREFIX));
        tracing::Span::current().record(
            "merchant_transaction_id",
            merchant_transaction_id.as_str(),
        );

        match self
            .try_create_payment(&request, &merchant_transaction_id)
            .await
        {
            Ok(result) => {
                tracing::info!(
                    succeeded = result.succeeded,
                    code = %result.status_code,
                    "PhonePe payment created"
                );
                result
            }
            Err(report) => fold_into_payment_result(report, PAYMENT_ERROR_CODE),
        }
    }

    #[tracing::instrument(name = "phonepe_verify_payment", skip(self))]
    async fn verify_payment(&self, merchant_transaction_id: &str) -> PaymentResult {
        match self.try_verify_payment(merchant_transaction_id).await {
            Ok(result) => {
                tracing::info!(
                    succeeded = result.succeeded,
                    code = %result.status_code,
                    state = ?result.details.as_ref().map(|details| details.state),
                    "PhonePe payment status fetched"
                );
                result
            }
            Err(report) => fold_into_payment_result(report, VERIFICATION_ERROR_CODE),
        }
    }

    fn process_webhook(&self, payload: &serde_json::Value, supplied_checksum: &str) -> bool {
        let expected = match transformers::generate_phonepe_webhook_checksum(
            payload,
            &self.config.salt_key,
            &self.config.salt_index,
        ) {
            Ok(checksum) => checksum,
            Err(report) => {
                tracing::error!(error = ?report, "could not compute webhook checksum");
                return false;
            }
        };

        let authentic = crypto::constant_time_eq(expected.as_bytes(), supplied_checksum.as_bytes());
        if !authentic {
            external_services::warn_log(
                "WEBHOOK_CHECKSUM_MISMATCH",
                &json!("Dropping PhonePe callback with an invalid X-VERIFY checksum"),
            );
        }
        authentic
    }

    fn decode_webhook_event(
        &self,
        payload: &serde_json::Value,
    ) -> CustomResult<PaymentResult, errors::ConnectorError> {
        let sync_response = transformers::decode_phonepe_webhook_body(payload)?;
        PaymentResult::try_from(ResponseRouterData {
            response: sync_response,
            router_data: &PhonepeSyncRouterData {
                config: &self.config,
                merchant_transaction_id: None,
            },
            http_code: 200,
        })
        .change_context(errors::ConnectorError::WebhookBodyDecodingFailed)
    }
}

use base64::Engine;
use common_utils::{
    consts::BASE64_ENGINE,
    crypto::{self, GenerateDigest},
    custom_serde::{canonical_json, exposed_optional_secret, exposed_secret},
    errors::{CustomResult, ValidationError},
    ext_traits::{ByteSliceExt, Encode, ValueExt},
    types::MinorUnit,
};
use domain_types::{
    connector_types::{PaymentDetails, PaymentRequest, PaymentResult, PaymentState},
    errors,
    payment_method_data::{CardDetails, PaymentInstrument},
    types::PhonepeConfig,
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use super::constants;
use crate::types::ResponseRouterData;

type Error = error_stack::Report<errors::ConnectorError>;

/// Everything needed to build one pay call
#[derive(Debug)]
pub struct PhonepeRouterData<'a> {
    pub config: &'a PhonepeConfig,
    pub merchant_transaction_id: &'a str,
    pub request: &'a PaymentRequest,
}

/// Context for mapping a status answer. The transaction id is unknown for webhooks.
#[derive(Debug)]
pub struct PhonepeSyncRouterData<'a> {
    pub config: &'a PhonepeConfig,
    pub merchant_transaction_id: Option<&'a str>,
}

// ===== REQUEST STRUCTURES =====

#[derive(Debug, Serialize)]
pub struct PhonepePaymentsRequest {
    request: String,
    #[serde(skip)]
    pub checksum: String,
}

impl PhonepePaymentsRequest {
    pub fn base64_payload(&self) -> &str {
        &self.request
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhonepePaymentRequestPayload {
    #[serde(serialize_with = "exposed_secret::serialize")]
    merchant_id: Secret<String>,
    merchant_transaction_id: String,
    merchant_user_id: String,
    amount: MinorUnit,
    redirect_url: String,
    redirect_mode: &'static str,
    callback_url: String,
    #[serde(
        serialize_with = "exposed_optional_secret::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    mobile_number: Option<Secret<String>>,
    payment_instrument: PhonepePaymentInstrument,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum PhonepePaymentInstrument {
    #[serde(rename = "PAY_PAGE")]
    PayPage,
    #[serde(rename = "UPI_COLLECT")]
    UpiCollect {
        #[serde(serialize_with = "exposed_secret::serialize")]
        vpa: Secret<String>,
    },
    #[serde(rename = "UPI_INTENT")]
    UpiIntent {
        #[serde(rename = "targetApp", skip_serializing_if = "Option::is_none")]
        target_app: Option<String>,
    },
    #[serde(rename = "UPI_QR")]
    UpiQr,
    #[serde(rename = "CARD")]
    Card {
        #[serde(rename = "authMode")]
        auth_mode: &'static str,
        #[serde(rename = "saveCard")]
        save_card: bool,
        #[serde(rename = "cardDetails")]
        card_details: PhonepeCardDetails,
    },
    #[serde(rename = "NET_BANKING")]
    NetBanking {
        #[serde(rename = "bankId")]
        bank_id: String,
    },
}

impl PhonepePaymentInstrument {
    fn instrument_type(&self) -> &'static str {
        match self {
            Self::PayPage => constants::PAY_PAGE,
            Self::UpiCollect { .. } => constants::UPI_COLLECT,
            Self::UpiIntent { .. } => constants::UPI_INTENT,
            Self::UpiQr => constants::UPI_QR,
            Self::Card { .. } => constants::CARD,
            Self::NetBanking { .. } => constants::NET_BANKING,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhonepeCardDetails {
    #[serde(serialize_with = "exposed_secret::serialize")]
    encrypted_card_number: Secret<String>,
    encryption_key_id: i64,
    #[serde(
        serialize_with = "exposed_optional_secret::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    card_holder_name: Option<Secret<String>>,
    #[serde(serialize_with = "exposed_secret::serialize")]
    expiry_month: Secret<String>,
    #[serde(serialize_with = "exposed_secret::serialize")]
    expiry_year: Secret<String>,
    #[serde(serialize_with = "exposed_secret::serialize")]
    encrypted_cvv: Secret<String>,
}

impl From<&CardDetails> for PhonepeCardDetails {
    fn from(card: &CardDetails) -> Self {
        Self {
            encrypted_card_number: card.encrypted_card_number.clone(),
            encryption_key_id: card.encryption_key_id,
            card_holder_name: card.card_holder_name.clone(),
            expiry_month: card.expiry_month.clone(),
            expiry_year: card.expiry_year.clone(),
            encrypted_cvv: card.encrypted_cvv.clone(),
        }
    }
}

impl From<Option<&PaymentInstrument>> for PhonepePaymentInstrument {
    fn from(instrument: Option<&PaymentInstrument>) -> Self {
        match instrument {
            None | Some(PaymentInstrument::HostedPage) => Self::PayPage,
            Some(PaymentInstrument::CollectRequest { vpa }) => Self::UpiCollect { vpa: vpa.clone() },
            Some(PaymentInstrument::IntentRequest { target_app }) => Self::UpiIntent {
                target_app: target_app.clone(),
            },
            Some(PaymentInstrument::QrRequest) => Self::UpiQr,
            Some(PaymentInstrument::Card(card)) => Self::Card {
                auth_mode: constants::CARD_AUTH_MODE,
                save_card: card.save_card,
                card_details: PhonepeCardDetails::from(card),
            },
            Some(PaymentInstrument::NetBanking { bank_id }) => Self::NetBanking {
                bank_id: bank_id.clone(),
            },
        }
    }
}

/// Wire name of the instrument a request will be paid with
pub fn requested_instrument_type(instrument: Option<&PaymentInstrument>) -> &'static str {
    PhonepePaymentInstrument::from(instrument).instrument_type()
}

// ===== SYNC REQUEST STRUCTURES =====

#[derive(Debug)]
pub struct PhonepeSyncRequest {
    pub api_path: String,
    pub checksum: String,
}

// ===== RESPONSE STRUCTURES =====

#[derive(Debug, Deserialize)]
pub struct PhonepeErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub code: String,
    #[serde(default = "default_error_message")]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PhonepePaymentsResponse {
    pub success: bool,
    pub code: String,
    #[serde(default = "default_error_message")]
    pub message: String,
    #[serde(default)]
    pub data: Option<PhonepeResponseData>,
}

#[derive(Debug, Deserialize)]
pub struct PhonepeSyncResponse {
    pub success: bool,
    pub code: String,
    #[serde(default = "default_sync_error_message")]
    pub message: String,
    #[serde(default)]
    pub data: Option<PhonepeSyncResponseData>,
}

fn default_error_message() -> String {
    "Payment processing failed".to_string()
}

fn default_sync_error_message() -> String {
    "Payment sync failed".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonepeResponseData {
    merchant_id: Option<String>,
    merchant_transaction_id: Option<String>,
    transaction_id: Option<String>,
    amount: Option<MinorUnit>,
    state: Option<String>,
    instrument_response: Option<PhonepeInstrumentResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonepeInstrumentResponse {
    #[serde(rename = "type")]
    instrument_type: Option<String>,
    redirect_info: Option<PhonepeRedirectInfo>,
    intent_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhonepeRedirectInfo {
    url: String,
}

impl PhonepeInstrumentResponse {
    /// Hosted pages answer with a redirect, UPI intent/QR with an intent url
    fn payment_url(&self) -> Option<String> {
        self.redirect_info
            .as_ref()
            .map(|info| info.url.clone())
            .or_else(|| self.intent_url.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonepePaymentInstrumentSync {
    #[serde(rename = "type")]
    pub instrument_type: Option<String>,
    pub utr: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonepeSyncResponseData {
    merchant_id: Option<String>,
    merchant_transaction_id: Option<String>,
    transaction_id: Option<String>,
    amount: Option<MinorUnit>,
    state: Option<String>,
    response_code: Option<String>,
    pub payment_instrument: Option<PhonepePaymentInstrumentSync>,
}

// ===== REQUEST BUILDING =====

impl TryFrom<&PhonepeRouterData<'_>> for PhonepePaymentsRequest {
    type Error = Error;

    fn try_from(item: &PhonepeRouterData<'_>) -> Result<Self, Self::Error> {
        let config = item.config;
        let request = item.request;

        let payload = PhonepePaymentRequestPayload {
            merchant_id: config.merchant_id.clone(),
            merchant_transaction_id: item.merchant_transaction_id.to_string(),
            merchant_user_id: request.payer_id.clone(),
            amount: request.amount_minor_units,
            redirect_url: request.redirect_url.to_string(),
            redirect_mode: constants::REDIRECT_MODE_POST,
            callback_url: request.callback_url.to_string(),
            mobile_number: request.payer_mobile.clone(),
            payment_instrument: PhonepePaymentInstrument::from(request.instrument.as_ref()),
        };

        let json_payload = Encode::encode_to_string_of_json(&payload)
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;

        let base64_payload = BASE64_ENGINE.encode(json_payload);

        let checksum = generate_phonepe_checksum(
            &base64_payload,
            constants::API_PAY_ENDPOINT,
            &config.salt_key,
            &config.salt_index,
        );

        Ok(Self {
            request: base64_payload,
            checksum,
        })
    }
}

impl TryFrom<&PhonepeSyncRouterData<'_>> for PhonepeSyncRequest {
    type Error = Error;

    fn try_from(item: &PhonepeSyncRouterData<'_>) -> Result<Self, Self::Error> {
        let merchant_transaction_id = item.merchant_transaction_id.ok_or(
            errors::ConnectorError::RequestEncodingFailed,
        )?;

        let api_path = format!(
            "{}/{}/{}",
            constants::API_STATUS_ENDPOINT,
            item.config.merchant_id.peek(),
            merchant_transaction_id
        );
        let checksum =
            generate_phonepe_sync_checksum(&api_path, &item.config.salt_key, &item.config.salt_index);

        Ok(Self { api_path, checksum })
    }
}

/// The processor accepts at most 35 characters out of `[A-Za-z0-9_-]`. Anything else
/// would also end up unescaped in the status path.
pub fn validate_merchant_transaction_id(
    merchant_transaction_id: &str,
) -> CustomResult<(), ValidationError> {
    let is_valid = !merchant_transaction_id.is_empty()
        && merchant_transaction_id.len() <= constants::MAX_MERCHANT_TRANSACTION_ID_LENGTH
        && merchant_transaction_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if is_valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            message: format!(
                "merchant transaction id must be 1-{} characters of A-Z, a-z, 0-9, '_' or '-'",
                constants::MAX_MERCHANT_TRANSACTION_ID_LENGTH
            ),
        }
        .into())
    }
}

// ===== CHECKSUM =====

fn generate_phonepe_checksum(
    base64_payload: &str,
    api_path: &str,
    salt_key: &Secret<String>,
    key_index: &str,
) -> String {
    // PhonePe checksum algorithm: SHA256(base64Payload + apiPath + saltKey) + "###" + keyIndex
    let checksum_input = format!("{}{}{}", base64_payload, api_path, salt_key.peek());
    let hash = crypto::Sha256.generate_hex_digest(checksum_input.as_bytes());

    format!("{}{}{}", hash, constants::CHECKSUM_SEPARATOR, key_index)
}

fn generate_phonepe_sync_checksum(
    api_path: &str,
    salt_key: &Secret<String>,
    key_index: &str,
) -> String {
    // Status calls carry no body: SHA256("" + apiPath + saltKey) + "###" + keyIndex
    generate_phonepe_checksum("", api_path, salt_key, key_index)
}

/// SHA256(canonicalJson(payload) + saltKey) + "###" + keyIndex
pub fn generate_phonepe_webhook_checksum(
    payload: &serde_json::Value,
    salt_key: &Secret<String>,
    key_index: &str,
) -> Result<String, Error> {
    let canonical_payload = canonical_json::to_string(payload)
        .change_context(errors::ConnectorError::RequestEncodingFailed)?;
    Ok(generate_phonepe_checksum(
        &canonical_payload,
        "",
        salt_key,
        key_index,
    ))
}

// ===== STATUS MAPPING =====

/// `data.state` wins when present, the response code decides otherwise
pub fn get_phonepe_payment_state(state: Option<&str>, code: &str) -> PaymentState {
    match state {
        Some("COMPLETED") => PaymentState::Completed,
        Some("FAILED") => PaymentState::Failed,
        Some("PENDING") => PaymentState::Pending,
        _ => match code {
            "PAYMENT_SUCCESS" => PaymentState::Completed,
            "PAYMENT_PENDING" | "TIMED_OUT" | "INTERNAL_SERVER_ERROR" => PaymentState::Pending,
            "PAYMENT_ERROR"
            | "PAYMENT_DECLINED"
            | "BAD_REQUEST"
            | "AUTHORIZATION_FAILED"
            | "TRANSACTION_NOT_FOUND" => PaymentState::Failed,
            _ => PaymentState::Pending, // Default to pending for unknown codes
        },
    }
}

// ===== PAY RESPONSE HANDLING =====

impl TryFrom<ResponseRouterData<PhonepePaymentsResponse, &PhonepeRouterData<'_>>>
    for PaymentResult
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<PhonepePaymentsResponse, &PhonepeRouterData<'_>>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;

        if response.success && response.data.is_none() {
            return Err(errors::ConnectorError::ResponseDeserializationFailed)
                .attach_printable("PhonePe reported success without a data object");
        }

        if !response.success {
            tracing::warn!(
                code = %response.code,
                http_code,
                merchant_transaction_id = %router_data.merchant_transaction_id,
                "PhonePe rejected the payment request"
            );
        }

        let details = response.data.map(|data| {
            let state = get_phonepe_payment_state(data.state.as_deref(), &response.code);
            let payment_url = data
                .instrument_response
                .as_ref()
                .and_then(PhonepeInstrumentResponse::payment_url);
            let instrument_used = data
                .instrument_response
                .and_then(|instrument| instrument.instrument_type)
                .unwrap_or_else(|| {
                    requested_instrument_type(router_data.request.instrument.as_ref()).to_string()
                });

            PaymentDetails {
                merchant_id: data
                    .merchant_id
                    .unwrap_or_else(|| router_data.config.merchant_id.peek().clone()),
                merchant_transaction_id: data
                    .merchant_transaction_id
                    .unwrap_or_else(|| router_data.merchant_transaction_id.to_string()),
                processor_transaction_id: data.transaction_id,
                amount_minor_units: data
                    .amount
                    .or(Some(router_data.request.amount_minor_units)),
                state,
                instrument_used: Some(instrument_used),
                utr_reference: None,
                payment_url,
            }
        });

        Ok(Self {
            succeeded: response.success,
            status_code: response.code,
            message: response.message,
            details,
        })
    }
}

// ===== SYNC RESPONSE HANDLING =====

impl TryFrom<ResponseRouterData<PhonepeSyncResponse, &PhonepeSyncRouterData<'_>>>
    for PaymentResult
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<PhonepeSyncResponse, &PhonepeSyncRouterData<'_>>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;

        if response.success && response.data.is_none() {
            return Err(errors::ConnectorError::ResponseDeserializationFailed)
                .attach_printable("PhonePe reported success without a data object");
        }

        let details = match response.data {
            Some(data) => {
                let merchant_transaction_id = data
                    .merchant_transaction_id
                    .or_else(|| router_data.merchant_transaction_id.map(str::to_string))
                    .ok_or(errors::ConnectorError::ResponseDeserializationFailed)
                    .attach_printable("status answer does not name the transaction")?;
                let state = get_phonepe_payment_state(data.state.as_deref(), &response.code);
                let (instrument_used, utr_reference) = data
                    .payment_instrument
                    .map(|instrument| (instrument.instrument_type, instrument.utr))
                    .unwrap_or_default();

                tracing::debug!(
                    %merchant_transaction_id,
                    ?state,
                    response_code = ?data.response_code,
                    http_code,
                    "mapped PhonePe status"
                );

                Some(PaymentDetails {
                    merchant_id: data
                        .merchant_id
                        .unwrap_or_else(|| router_data.config.merchant_id.peek().clone()),
                    merchant_transaction_id,
                    processor_transaction_id: data.transaction_id,
                    amount_minor_units: data.amount,
                    state,
                    instrument_used,
                    utr_reference,
                    payment_url: None,
                })
            }
            None => None,
        };

        Ok(Self {
            succeeded: response.success,
            status_code: response.code,
            message: response.message,
            details,
        })
    }
}

// ===== WEBHOOK DECODING =====

/// Callbacks arrive as `{"response": "<base64 status json>"}`; a bare status object is
/// accepted too.
pub fn decode_phonepe_webhook_body(
    payload: &serde_json::Value,
) -> Result<PhonepeSyncResponse, Error> {
    match payload.get("response").and_then(serde_json::Value::as_str) {
        Some(encoded) => {
            let decoded = BASE64_ENGINE
                .decode(encoded)
                .change_context(errors::ConnectorError::WebhookBodyDecodingFailed)?;
            decoded
                .as_slice()
                .parse_struct("PhonepeSyncResponse")
                .change_context(errors::ConnectorError::WebhookBodyDecodingFailed)
        }
        None => payload
            .clone()
            .parse_value("PhonepeSyncResponse")
            .change_context(errors::ConnectorError::WebhookBodyDecodingFailed),
    }
}

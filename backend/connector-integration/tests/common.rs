use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use common_utils::{
    crypto::{GenerateDigest, Sha256},
    errors::CustomResult,
    request::{Method, Request},
    types::MinorUnit,
};
use connector_integration::connectors::Phonepe;
use domain_types::{
    connector_types::PaymentRequest, errors::ApiClientError, router_response_types::Response,
    types::PhonepeConfig,
};
use external_services::ConnectorTransport;
use hyperswitch_masking::{ExposeInterface, Secret};

pub const MERCHANT_ID: &str = "PGTESTPAYUAT";
pub const SALT_KEY: &str = "099eb0cd-02cf-4e2a-8aca-3e6c6aff0399";
pub const SALT_INDEX: &str = "1";

pub fn sandbox_config(base_url: &str) -> PhonepeConfig {
    PhonepeConfig {
        base_url: base_url.to_string(),
        merchant_id: Secret::new(MERCHANT_ID.to_string()),
        salt_key: Secret::new(SALT_KEY.to_string()),
        salt_index: SALT_INDEX.to_string(),
    }
}

pub fn payment_request(merchant_order_id: Option<&str>, amount: i64) -> PaymentRequest {
    PaymentRequest {
        amount_minor_units: MinorUnit::new(amount),
        merchant_order_id: merchant_order_id.map(str::to_string),
        payer_id: "MUID123".to_string(),
        redirect_url: url::Url::parse("https://astro.example/payment/return").unwrap(),
        callback_url: url::Url::parse("https://astro.example/api/payment/webhook").unwrap(),
        payer_mobile: None,
        instrument: None,
    }
}

/// hex(sha256(input)) + "###" + index, computed without the connector
pub fn independent_checksum(input: &str, index: &str) -> String {
    let hash = Sha256.generate_hex_digest(input.as_bytes());
    format!("{hash}###{index}")
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

pub type CannedAnswer = CustomResult<Result<Response, Response>, ApiClientError>;

/// In-process transport that records every request and replays queued answers.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    answers: Mutex<VecDeque<CannedAnswer>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_answer(&self, answer: CannedAnswer) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn push_json(&self, status_code: u16, body: serde_json::Value) {
        let response = Response {
            headers: None,
            response: bytes::Bytes::from(body.to_string()),
            status_code,
        };
        self.push_answer(Ok(if (200..300).contains(&status_code) {
            Ok(response)
        } else {
            Err(response)
        }));
    }

    pub fn push_raw(&self, status_code: u16, body: &'static str) {
        let response = Response {
            headers: None,
            response: bytes::Bytes::from_static(body.as_bytes()),
            status_code,
        };
        self.push_answer(Ok(if (200..300).contains(&status_code) {
            Ok(response)
        } else {
            Err(response)
        }));
    }

    pub fn push_failure(&self, error: ApiClientError) {
        self.push_answer(Err(error_stack::report!(error)));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for RecordingTransport {
    async fn send(&self, request: Request, _flow_name: &str) -> CannedAnswer {
        let recorded = RecordedRequest {
            url: request.url.clone(),
            method: request.method,
            headers: request.get_headers_map(),
            body: request
                .body
                .as_ref()
                .map(|body| serde_json::from_str(&body.get_inner_value().expose()).unwrap()),
        };
        self.requests.lock().unwrap().push(recorded);

        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(error_stack::report!(ApiClientError::UnexpectedServerResponse)))
    }
}

pub fn gateway(transport: Arc<RecordingTransport>) -> Phonepe {
    Phonepe::new(
        sandbox_config("https://api-preprod.phonepe.com/apis/pg-sandbox"),
        transport,
    )
}

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use axum::{body::Body, http, Router};
use checkout_server::{app, http::AppState};
use common_utils::{errors::CustomResult, request::Request};
use connector_integration::connectors::Phonepe;
use domain_types::{errors::ApiClientError, router_response_types::Response, types::PhonepeConfig};
use external_services::ConnectorTransport;
use http_body_util::BodyExt;
use hyperswitch_masking::Secret;

pub const MERCHANT_ID: &str = "PGTESTPAYUAT";
pub const SALT_KEY: &str = "099eb0cd-02cf-4e2a-8aca-3e6c6aff0399";
pub const SALT_INDEX: &str = "1";

pub fn sandbox_config() -> PhonepeConfig {
    PhonepeConfig {
        base_url: "https://api-preprod.phonepe.com/apis/pg-sandbox".to_string(),
        merchant_id: Secret::new(MERCHANT_ID.to_string()),
        salt_key: Secret::new(SALT_KEY.to_string()),
        salt_index: SALT_INDEX.to_string(),
    }
}

/// Replays queued processor answers and remembers which urls were hit.
#[derive(Default)]
pub struct StubTransport {
    urls: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<(u16, serde_json::Value)>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status_code: u16, body: serde_json::Value) {
        self.answers.lock().unwrap().push_back((status_code, body));
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for StubTransport {
    async fn send(
        &self,
        request: Request,
        _flow_name: &str,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        self.urls.lock().unwrap().push(request.url.clone());

        let (status_code, body) = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| error_stack::report!(ApiClientError::RequestNotSent("no answer".into())))?;
        let response = Response {
            headers: None,
            response: bytes::Bytes::from(body.to_string()),
            status_code,
        };
        Ok(if (200..300).contains(&status_code) {
            Ok(response)
        } else {
            Err(response)
        })
    }
}

pub fn app(transport: Arc<StubTransport>) -> Router {
    let gateway = Arc::new(Phonepe::new(sandbox_config(), transport));
    app::router_with_layers(AppState::new(gateway))
}

pub fn json_request(method: http::Method, uri: &str, body: &serde_json::Value) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

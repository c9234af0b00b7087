#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

mod common;

use std::sync::Arc;

use common::{independent_checksum, payment_request, sandbox_config, MERCHANT_ID, SALT_INDEX, SALT_KEY};
use connector_integration::{connectors::Phonepe, PaymentGateway};
use domain_types::{connector_types::PaymentState, types::Proxy};
use external_services::HttpTransport;
use serde_json::json;
use wiremock::{
    matchers::{header, header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn gateway_for(server: &MockServer) -> Phonepe {
    Phonepe::new(
        sandbox_config(&server.uri()),
        Arc::new(HttpTransport::new(Proxy::default())),
    )
}

#[tokio::test]
async fn test_create_payment_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pg/v1/pay"))
        .and(header("Content-Type", "application/json"))
        .and(header("accept", "application/json"))
        .and(header_exists("X-VERIFY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": "PAYMENT_INITIATED",
            "message": "Payment initiated",
            "data": {
                "merchantId": MERCHANT_ID,
                "merchantTransactionId": "MTHTTP1",
                "instrumentResponse": {
                    "type": "UPI_INTENT",
                    "intentUrl": "upi://pay?pa=PGTESTPAYUAT@ybl&am=100.00"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .create_payment(payment_request(Some("MTHTTP1"), 10_000))
        .await;

    assert!(result.succeeded, "{result:?}");
    let details = result.details.expect("details");
    assert_eq!(details.instrument_used.as_deref(), Some("UPI_INTENT"));
    assert_eq!(
        details.payment_url.as_deref(),
        Some("upi://pay?pa=PGTESTPAYUAT@ybl&am=100.00")
    );

    let received = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).expect("json body");
    let base64_payload = body["request"].as_str().expect("request field");
    let expected = independent_checksum(&format!("{base64_payload}/pg/v1/pay{SALT_KEY}"), SALT_INDEX);
    assert_eq!(
        received[0]
            .headers
            .get("X-VERIFY")
            .and_then(|value| value.to_str().ok()),
        Some(expected.as_str())
    );
}

#[tokio::test]
async fn test_verify_payment_over_http() {
    let server = MockServer::start().await;
    let status_path = format!("/pg/v1/status/{MERCHANT_ID}/MTHTTP2");
    let checksum = independent_checksum(&format!("{status_path}{SALT_KEY}"), SALT_INDEX);
    Mock::given(method("GET"))
        .and(path(status_path.as_str()))
        .and(header("X-VERIFY", checksum.as_str()))
        .and(header("X-MERCHANT-ID", MERCHANT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "code": "PAYMENT_ERROR",
            "message": "Payment Failed",
            "data": {
                "merchantId": MERCHANT_ID,
                "merchantTransactionId": "MTHTTP2",
                "transactionId": "T1",
                "amount": 10000,
                "state": "FAILED",
                "responseCode": "ZM"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server).verify_payment("MTHTTP2").await;

    assert!(!result.succeeded);
    assert_eq!(result.status_code, "PAYMENT_ERROR");
    assert_eq!(result.message, "Payment Failed");
    assert_eq!(result.details.map(|details| details.state), Some(PaymentState::Failed));
}

#[tokio::test]
async fn test_server_error_with_envelope_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pg/v1/pay"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "code": "INTERNAL_SERVER_ERROR",
            "message": "There is an error trying to process your transaction at the moment."
        })))
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .create_payment(payment_request(Some("MTHTTP3"), 10_000))
        .await;

    assert!(!result.succeeded);
    assert_eq!(result.status_code, "INTERNAL_SERVER_ERROR");
}

use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{errors::ApiClientError, router_response_types::Response, types::Proxy};
use error_stack::{report, ResultExt};
use hyperswitch_masking::Maskable;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

/// Seam between a connector and the network. `Ok(Ok(_))` is a 2xx/302 answer,
/// `Ok(Err(_))` a 4xx/5xx answer, `Err(_)` means no usable answer came back.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn send(
        &self,
        request: Request,
        flow_name: &str,
    ) -> CustomResult<Result<Response, Response>, ApiClientError>;
}

/// reqwest backed transport. Calls are not time-bounded here; callers wrap them.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    proxy: Proxy,
}

impl HttpTransport {
    pub fn new(proxy: Proxy) -> Self {
        Self { proxy }
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for HttpTransport {
    #[tracing::instrument(
        name = "outgoing_connector_request",
        skip_all,
        fields(
            flow = %flow_name,
            request.url = %request.url,
            request.method = %request.method,
            request.headers = Empty,
            response.status_code = Empty,
            message_ = "Golden Log Line (outgoing)",
            latency = Empty,
        )
    )]
    async fn send(
        &self,
        request: Request,
        flow_name: &str,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let start = tokio::time::Instant::now();
        tracing::Span::current().record(
            "request.headers",
            tracing::field::display(masked_headers(&request.headers)),
        );

        let result = call_connector_api(&self.proxy, request, flow_name).await;

        let elapsed = start.elapsed().as_millis();
        tracing::Span::current().record("latency", elapsed);
        match &result {
            Ok(Ok(response)) | Ok(Err(response)) => {
                tracing::Span::current().record("response.status_code", response.status_code);
                tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
            }
            Err(error) => {
                tracing::warn!(tag = ?Tag::OutgoingApi, log_type = "api", ?error, "Outgoing Request failed");
            }
        }
        result
    }
}

/// Headers for logging, masked values replaced.
pub fn masked_headers(headers: &Headers) -> Value {
    let masked = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => Value::String("*** alloc::string::String ***".to_string()),
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    Value::Object(masked)
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
    flow_name: &str,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.should_bypass(url.as_str());

    let client = create_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let request = match request.method {
        Method::Get => client.get(url),
        Method::Post => {
            let client = client.post(url);
            match request.body {
                Some(RequestContent::Json(payload)) => client.json(&payload),
                None => client,
            }
        }
    }
    .headers(headers);

    let response = request.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!(format!("Unable to send {flow_name} request to connector.")),
        );
        report!(api_error)
    })?;

    handle_response(response).await
}

pub fn create_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    get_base_client(proxy_config, should_bypass_proxy)
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy || !proxy_config.is_proxy_configured() {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    resp: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = resp.status().as_u16();
    let headers = Some(resp.headers().to_owned());
    match status_code {
        200..=202 | 302 | 204 => {
            let response = resp
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                headers,
                response,
                status_code,
            }))
        }
        400..=599 => {
            let bytes = resp.bytes().await.map_err(|error| {
                report!(error).change_context(ApiClientError::ResponseDecodingFailed)
            })?;

            Ok(Err(Response {
                headers,
                response: bytes,
                status_code,
            }))
        }
        _ => {
            info_log(
                "UNEXPECTED_RESPONSE",
                &json!("Unexpected response from server."),
            );
            Err(report!(ApiClientError::UnexpectedServerResponse))
        }
    }
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

/// Tags carried by the structured log lines.
#[derive(Debug, Clone, Copy)]
pub enum Tag {
    /// Api Outgoing Request
    OutgoingApi,
    /// Inbound processor callback
    IncomingWebhook,
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}

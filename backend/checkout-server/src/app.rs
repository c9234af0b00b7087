use std::{future::Future, net, sync::Arc};

use axum::{extract::Request, http, Router};
use common_utils::consts;
use connector_integration::{connectors::Phonepe, BoxedPaymentGateway};
use external_services::HttpTransport;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::oneshot,
};
use tower_http::{request_id::MakeRequestUuid, trace as tower_trace};

use crate::{configs, error::ConfigurationError, http::AppState, logger, utils};

/// # Panics
///
/// Will panic if signal handling fails
pub async fn server_builder(config: configs::Config) -> Result<(), ConfigurationError> {
    let server_config = config.server.clone();
    let socket_addr = net::SocketAddr::new(server_config.host.parse()?, server_config.port);

    // Signal handler
    let (tx, rx) = oneshot::channel();

    #[allow(clippy::expect_used)]
    tokio::spawn(async move {
        let mut sig_int =
            signal(SignalKind::interrupt()).expect("Failed to initialize SIGINT signal handler");
        let mut sig_term =
            signal(SignalKind::terminate()).expect("Failed to initialize SIGTERM signal handler");
        let mut sig_quit =
            signal(SignalKind::quit()).expect("Failed to initialize QUIT signal handler");
        let mut sig_hup =
            signal(SignalKind::hangup()).expect("Failed to initialize SIGHUP signal handler");

        tokio::select! {
            _ = sig_int.recv() => {
                logger::info!("Received SIGINT");
                tx.send(()).expect("Failed to send SIGINT signal");
            }
            _ = sig_term.recv() => {
                logger::info!("Received SIGTERM");
                tx.send(()).expect("Failed to send SIGTERM signal");
            }
            _ = sig_quit.recv() => {
                logger::info!("Received QUIT");
                tx.send(()).expect("Failed to send QUIT signal");
            }
            _ = sig_hup.recv() => {
                logger::info!("Received SIGHUP");
                tx.send(()).expect("Failed to send SIGHUP signal");
            }
        }
    });

    #[allow(clippy::expect_used)]
    let shutdown_signal = async {
        rx.await.expect("Failed to receive shutdown signal");
        logger::info!("Shutdown signal received");
    };

    logger::info!(
        host = %server_config.host,
        port = %server_config.port,
        environment = %config.common.environment,
        "starting checkout server"
    );

    let state = AppState::new(build_gateway(&config));
    http_server(state, socket_addr, shutdown_signal).await
}

/// The processor connector wired to the real network transport.
pub fn build_gateway(config: &configs::Config) -> BoxedPaymentGateway {
    let transport = Arc::new(HttpTransport::new(config.proxy.clone()));
    Arc::new(Phonepe::new(config.connectors.phonepe.clone(), transport))
}

/// Routes plus request id and tracing layers.
pub fn router_with_layers(state: AppState) -> Router {
    let logging_layer = tower_trace::TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| utils::record_fields_from_header(request))
        .on_request(tower_trace::DefaultOnRequest::new().level(tracing::Level::INFO))
        .on_response(
            tower_trace::DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
        .on_failure(
            tower_trace::DefaultOnFailure::new()
                .latency_unit(tower_http::LatencyUnit::Micros)
                .level(tracing::Level::ERROR),
        );

    let request_id_layer = tower_http::request_id::SetRequestIdLayer::new(
        http::HeaderName::from_static(consts::X_REQUEST_ID),
        MakeRequestUuid,
    );

    let propagate_request_id_layer = tower_http::request_id::PropagateRequestIdLayer::new(
        http::HeaderName::from_static(consts::X_REQUEST_ID),
    );

    crate::http::create_router(state)
        .layer(logging_layer)
        .layer(propagate_request_id_layer)
        .layer(request_id_layer)
}

pub async fn http_server(
    state: AppState,
    socket: net::SocketAddr,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ConfigurationError> {
    let router = router_with_layers(state);

    let listener = tokio::net::TcpListener::bind(socket).await?;
    logger::info!(%socket, "listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

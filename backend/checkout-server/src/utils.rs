use axum::http::Request;
use common_utils::consts;

/// Span for one incoming request, tagged with the caller supplied request id when present.
pub fn record_fields_from_header<B>(request: &Request<B>) -> tracing::Span {
    let url_path = request.uri().path();

    let span = tracing::debug_span!(
        "request",
        uri = %url_path,
        method = %request.method(),
        version = ?request.version(),
        request_id = tracing::field::Empty,
    );

    request
        .headers()
        .get(consts::X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(|request_id| span.record("request_id", request_id));

    span
}

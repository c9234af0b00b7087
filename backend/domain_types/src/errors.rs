#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to processor {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Unexpected state reached/Invariants conflicted")]
    UnexpectedServerResponse,
}

/// Failure kinds of the payment gateway. None of them escape the gateway boundary:
/// each is folded into a `PaymentResult` or a webhook verdict.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ConnectorError {
    #[error("Failed to encode processor request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize processor response")]
    ResponseDeserializationFailed,
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },
    #[error("Invalid merchant transaction id: {message}")]
    InvalidTransactionId { message: String },
    #[error("Request to the processor could not be completed")]
    TransportFailure,
    #[error("Processor rejected the request with {code}: {message}")]
    FailedAtConnector { code: String, message: String },
    #[error("Webhook body decoding failed")]
    WebhookBodyDecodingFailed,
}

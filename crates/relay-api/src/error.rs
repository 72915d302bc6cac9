//! Error types and the catch-all error envelope.
//!
//! Handlers return [`RelayError`]. Turning one into a response records the
//! failure in the response extensions; [`error_envelope`], layered around
//! every route, picks it up again, logs it with the request method and path,
//! and decides what the client gets to see:
//!
//! - expected HTTP failures below 500 are logged at `info` and returned as-is
//! - everything else is logged at `error` and replaced with a generic 500

use axum::{
    extract::Request,
    http::{header::HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

/// Result type for relay handlers.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Body text of every response that hides the underlying cause.
pub const GENERIC_ERROR_MESSAGE: &str = "Oops! Something went wrong.";

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Failure of a relay route.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// A failure that already knows its status code and response body.
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: Value },

    /// Anything else. The cause is logged, never shown to the client.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// Builds an expected HTTP failure with an `{"error": message}` body.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        RelayError::Http {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// Wraps any error as an unexpected failure.
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        RelayError::Unexpected(err.to_string())
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Http { status, .. } => *status,
            RelayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure is passed through to the client unchanged.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::Http { status, .. } if status.as_u16() < 500)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let mut response = match &self {
            RelayError::Http { status, body } => (*status, Json(body.clone())).into_response(),
            RelayError::Unexpected(_) => generic_error_response(),
        };
        response.extensions_mut().insert(self);
        response
    }
}

/// Structural failure while rendering a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("order items are missing")]
    MissingItems,

    #[error("order item {index} has no product")]
    MissingProduct { index: usize },
}

impl From<FormatError> for RelayError {
    fn from(err: FormatError) -> Self {
        RelayError::unexpected(err)
    }
}

fn generic_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": GENERIC_ERROR_MESSAGE })),
    )
        .into_response()
}

/// Middleware that observes every failed request in one place.
///
/// Server errors produced outside a handler (a caught panic, for instance)
/// carry no [`RelayError`] and are treated as unexpected.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_owned();

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<RelayError>() {
        Some(err) if err.is_client_error() => {
            info!(
                method = %method,
                path = %path,
                request_id = %request_id,
                status = %err.status_code(),
                error = %err,
                "Request rejected"
            );
            response
        }
        Some(err) => {
            error!(
                method = %method,
                path = %path,
                request_id = %request_id,
                error = %err,
                "Request failed"
            );
            generic_error_response()
        }
        None if response.status().is_server_error() => {
            error!(
                method = %method,
                path = %path,
                request_id = %request_id,
                status = %response.status(),
                "Request failed"
            );
            generic_error_response()
        }
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_error_status_codes() {
        assert_eq!(
            RelayError::http(StatusCode::BAD_REQUEST, "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::unexpected("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_relay_error_classification() {
        assert!(RelayError::http(StatusCode::BAD_REQUEST, "bad").is_client_error());
        assert!(RelayError::http(StatusCode::PAYLOAD_TOO_LARGE, "big").is_client_error());
        assert!(!RelayError::http(StatusCode::BAD_GATEWAY, "down").is_client_error());
        assert!(!RelayError::unexpected("boom").is_client_error());
    }

    #[test]
    fn test_relay_error_response_records_failure() {
        let response = RelayError::unexpected("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<RelayError>().is_some());
    }

    #[test]
    fn test_format_error_is_unexpected() {
        let err: RelayError = FormatError::MissingProduct { index: 2 }.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "unexpected error: order item 2 has no product");
    }
}

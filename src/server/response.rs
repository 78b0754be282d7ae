//! Response types and helpers for HTTP endpoints.

use hyper::{body::Bytes, Response, StatusCode};
use serde::Serialize;

use super::router::RouterError;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// Wrapper for list responses
#[derive(Debug, Serialize)]
pub struct ListBody<T> {
    pub data: T,
}

/// Acknowledgment returned by delete
#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

/// Serialize `value` and wrap it in a JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(value).map_err(|e| RouterError::Internal {
        message: "Failed to serialize response",
        cause: e.to_string(),
    })?;
    build_response(status, json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: StatusCode, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::Internal {
            message: "Failed to build response",
            cause: e.to_string(),
        })
}

/// Build the `{"error": ...}` response for a status.
///
/// Infallible: serialization of a borrowed string cannot fail, and a
/// builder error falls back to a bare status response.
pub fn error_response(status: StatusCode, message: &str) -> Response<Bytes> {
    let body = serde_json::to_vec(&ErrorBody { error: message })
        .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(body))
        .unwrap_or_else(|_| {
            let mut fallback = Response::new(Bytes::from_static(b"Internal Server Error"));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

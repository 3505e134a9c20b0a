//! Assertions for the error wire contract.
//!
//! Every error response carries `{"code": "...", "message": "..."}` with an
//! `application/json` content type. These helpers decode that shape and fail
//! with the raw payload when a response does not conform.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use serde::Deserialize;

/// Decoded error payload.
#[derive(Debug, Deserialize)]
pub struct WireError {
    pub code: String,
    pub message: String,
}

/// Read and decode an error body, checking status and content type on the way.
pub async fn read_error_body<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
) -> WireError {
    assert_eq!(
        resp.status(),
        expected_status,
        "unexpected status for error response"
    );
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "error response content type was {content_type:?}"
    );
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "response body is not an error envelope: {}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// Assert status, code, and the exact message.
pub async fn assert_error_body<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: &str,
) {
    let wire = read_error_body(resp, expected_status).await;
    assert_eq!(wire.code, expected_code);
    assert_eq!(wire.message, expected_message);
}

/// Assert status and code; the message only has to contain the fragment.
pub async fn assert_error_body_contains<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
    message_fragment: &str,
) {
    let wire = read_error_body(resp, expected_status).await;
    assert_eq!(wire.code, expected_code);
    assert!(
        wire.message.contains(message_fragment),
        "message {:?} does not contain {:?}",
        wire.message,
        message_fragment
    );
}

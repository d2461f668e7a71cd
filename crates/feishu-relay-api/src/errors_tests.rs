//! Tests for handler error responses.

use super::*;
use axum::http::StatusCode;
use feishu_relay_core::webhook::HeaderError;
use feishu_relay_core::{DeliveryError, SignatureError};

fn status_of(error: WebhookHandlerError) -> StatusCode {
    error.into_response().status()
}

#[test]
fn test_invalid_headers_maps_to_bad_request() {
    let error = WebhookHandlerError::InvalidHeaders(HeaderError::Missing {
        name: "X-GitHub-Event".to_string(),
    });

    assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
}

#[test]
fn test_invalid_signature_maps_to_unauthorized() {
    assert_eq!(
        status_of(WebhookHandlerError::InvalidSignature(
            SignatureError::Mismatch
        )),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(WebhookHandlerError::InvalidSignature(
            SignatureError::MissingSignature
        )),
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn test_malformed_payload_maps_to_internal_error() {
    let json_error = serde_json::from_slice::<serde_json::Value>(b"{ nope").unwrap_err();

    assert_eq!(
        status_of(WebhookHandlerError::MalformedPayload(json_error)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_delivery_failure_maps_to_internal_error() {
    let error = WebhookHandlerError::Delivery(DeliveryError::Rejected {
        status: 400,
        body: "invalid card".to_string(),
    });

    assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_internal_maps_to_internal_error() {
    let error = WebhookHandlerError::Internal {
        message: "boom".to_string(),
    };

    assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_shape() {
    let error = WebhookHandlerError::Delivery(DeliveryError::Rejected {
        status: 502,
        body: "bad gateway".to_string(),
    });

    let response = error.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Server error");
    assert!(body["details"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_signature_error_body_has_no_details() {
    // The response must not reveal which verification step failed
    let error = WebhookHandlerError::InvalidSignature(SignatureError::InvalidFormat {
        message: "bad hex".to_string(),
    });

    let response = error.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Invalid signature");
    assert!(body.get("details").is_none());
}

//! Tests for webhook signature verification.

use super::*;

fn sign_payload(secret: &str, payload: &[u8]) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;
    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(payload);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

// ============================================================================
// Test: Valid Signature Verification
// ============================================================================

#[tokio::test]
async fn test_validate_with_valid_signature() {
    // Arrange: validator with a known secret
    let secret = "test_webhook_secret";
    let validator = HmacSha256Validator::new(secret);

    let payload = br#"{"action":"completed","workflow_job":{"name":"build"}}"#;
    let signature = sign_payload(secret, payload);

    // Act
    let result = validator.validate(payload, Some(&signature)).await;

    // Assert
    assert!(result.is_ok(), "valid signature should pass verification");
}

#[tokio::test]
async fn test_validate_with_github_example_payload() {
    // Real GitHub documentation example secret
    let secret = "It's a Secret to Everybody";
    let validator = HmacSha256Validator::new(secret);

    let payload = br#"{"zen":"Design for failure.","hook_id":1}"#;
    let signature = sign_payload(secret, payload);

    let result = validator.validate(payload, Some(&signature)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_validate_with_empty_payload() {
    let secret = "test_secret";
    let validator = HmacSha256Validator::new(secret);

    let payload = b"";
    let signature = sign_payload(secret, payload);

    let result = validator.validate(payload, Some(&signature)).await;

    assert!(result.is_ok(), "empty payload with valid signature should pass");
}

#[tokio::test]
async fn test_validate_with_special_characters_in_secret() {
    let secret = "my!@#$%^&*()secret_key";
    let validator = HmacSha256Validator::new(secret);

    let payload = br#"{"action":"completed"}"#;
    let signature = sign_payload(secret, payload);

    let result = validator.validate(payload, Some(&signature)).await;

    assert!(result.is_ok());
}

// ============================================================================
// Test: Invalid Signature Detection
// ============================================================================

#[tokio::test]
async fn test_validate_with_tampered_payload() {
    // Arrange: signature computed over the original bytes
    let secret = "test_secret";
    let validator = HmacSha256Validator::new(secret);

    let original_payload = br#"{"action":"completed","number":1}"#;
    let tampered_payload = br#"{"action":"completed","number":2}"#;
    let signature = sign_payload(secret, original_payload);

    // Act: verify the tampered bytes against the original signature
    let result = validator.validate(tampered_payload, Some(&signature)).await;

    // Assert: any byte-for-byte mismatch must change the computed HMAC
    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

#[tokio::test]
async fn test_validate_with_wrong_secret() {
    let payload = br#"{"action":"completed"}"#;
    let signature = sign_payload("correct_secret", payload);

    let validator = HmacSha256Validator::new("wrong_secret");
    let result = validator.validate(payload, Some(&signature)).await;

    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

#[tokio::test]
async fn test_validate_with_modified_signature() {
    let secret = "test_secret";
    let validator = HmacSha256Validator::new(secret);

    let payload = br#"{"action":"completed"}"#;
    let mut signature = sign_payload(secret, payload);

    // Flip the last hex digit
    let last = signature.pop().unwrap();
    signature.push(if last == 'a' { 'b' } else { 'a' });

    let result = validator.validate(payload, Some(&signature)).await;

    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

#[tokio::test]
async fn test_validate_with_missing_signature_header() {
    let validator = HmacSha256Validator::new("test_secret");

    let result = validator.validate(br#"{"action":"completed"}"#, None).await;

    assert!(matches!(result, Err(SignatureError::MissingSignature)));
}

// ============================================================================
// Test: Signature Format Validation
// ============================================================================

#[tokio::test]
async fn test_validate_with_missing_prefix() {
    let validator = HmacSha256Validator::new("test_secret");

    let result = validator
        .validate(br#"{"action":"completed"}"#, Some("a1b2c3d4e5f6"))
        .await;

    assert!(matches!(result, Err(SignatureError::InvalidFormat { .. })));
}

#[tokio::test]
async fn test_validate_with_invalid_hex_encoding() {
    let validator = HmacSha256Validator::new("test_secret");

    let result = validator
        .validate(br#"{"action":"completed"}"#, Some("sha256=not_valid_hex!!!"))
        .await;

    assert!(matches!(result, Err(SignatureError::InvalidFormat { .. })));
}

#[tokio::test]
async fn test_validate_with_empty_signature() {
    let validator = HmacSha256Validator::new("test_secret");

    let result = validator.validate(br#"{"action":"completed"}"#, Some("")).await;

    assert!(matches!(result, Err(SignatureError::InvalidFormat { .. })));
}

#[tokio::test]
async fn test_validate_with_wrong_algorithm_prefix() {
    let validator = HmacSha256Validator::new("test_secret");

    let result = validator
        .validate(br#"{"action":"completed"}"#, Some("sha1=a1b2c3d4e5f6"))
        .await;

    assert!(matches!(result, Err(SignatureError::InvalidFormat { .. })));
}

#[tokio::test]
async fn test_validate_with_truncated_signature() {
    // Valid hex but wrong length must fail without erroring
    let validator = HmacSha256Validator::new("test_secret");

    let result = validator
        .validate(br#"{"action":"completed"}"#, Some("sha256=a1b2c3"))
        .await;

    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

// ============================================================================
// Test: Debug Output Security
// ============================================================================

#[test]
fn test_debug_output_does_not_expose_secret() {
    let secret = "super_secret_webhook_key";
    let validator = HmacSha256Validator::new(secret);

    let debug_output = format!("{:?}", validator);

    assert!(
        !debug_output.contains(secret),
        "debug output should not contain the secret"
    );
    assert!(debug_output.contains("REDACTED"));
}

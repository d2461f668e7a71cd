//! Tests for outbound message signing.

use super::*;
use base64::{engine::general_purpose, Engine as _};

/// Reference implementation of the scheme, spelled out step by step.
fn expected_signature(secret: &str, timestamp: i64) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;
    type HmacSha256 = Hmac<Sha256>;

    let string_to_sign = format!("{}\n{}", timestamp, secret);
    let mac = HmacSha256::new_from_slice(string_to_sign.as_bytes()).unwrap();
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

#[test]
fn test_signature_matches_documented_scheme() {
    // HMAC key is "{timestamp}\n{secret}", message is empty
    let sign = card_signature("abc", 1_704_067_200).unwrap();

    assert_eq!(sign, expected_signature("abc", 1_704_067_200));
}

#[test]
fn test_signature_is_deterministic() {
    let first = card_signature("abc", 1_704_067_200).unwrap();
    let second = card_signature("abc", 1_704_067_200).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_signature_changes_with_timestamp() {
    let first = card_signature("abc", 1_704_067_200).unwrap();
    let second = card_signature("abc", 1_704_067_201).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_signature_changes_with_secret() {
    let first = card_signature("abc", 1_704_067_200).unwrap();
    let second = card_signature("abd", 1_704_067_200).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_signature_is_valid_base64_of_sha256_output() {
    let sign = card_signature("abc", 1_704_067_200).unwrap();

    let decoded = general_purpose::STANDARD.decode(&sign).unwrap();

    // Raw HMAC-SHA256 output is 32 bytes
    assert_eq!(decoded.len(), 32);
}

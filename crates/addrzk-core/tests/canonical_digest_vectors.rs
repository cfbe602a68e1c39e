//! # Canonical Digest Vectors
//!
//! Fixed JCS + SHA-256 vectors. Any prover or verifier implementation that
//! canonicalizes proof data differently will disagree on these digests and
//! therefore on every MAC in a proof envelope.

use addrzk_core::{sha256_digest, AddressInput, CanonicalBytes, Timestamp};

fn digest_of(data: &impl serde::Serialize) -> String {
    let cb = CanonicalBytes::new(data).expect("canonicalization should succeed");
    sha256_digest(&cb).to_hex()
}

#[test]
fn address_record_vector() {
    let addr = AddressInput::new()
        .with("country", "JP")
        .with("city", "Shibuya");
    assert_eq!(
        sha256_digest(&addr.canonical_bytes().unwrap()).to_hex(),
        "f78500d570075edaa8cfb4feedf93d446e67b98cef9a5f1c537698aa202b4190"
    );
}

#[test]
fn envelope_header_vector() {
    let v = serde_json::json!({"version": 2, "type": "zkp_proof"});
    assert_eq!(
        digest_of(&v),
        "a912c503dc2e947d19c2467cb09a7c369abb9d9568f45e4b55ce0b60e5845538"
    );
}

#[test]
fn non_ascii_is_emitted_as_utf8() {
    let v = serde_json::json!({"city": "渋谷区"});
    assert_eq!(
        digest_of(&v),
        "654fb0e096a983d62e682a2b12cf58c43d8fbb804e5523c1ee529084acb900f6"
    );
}

#[test]
fn nested_array_vector() {
    let v = serde_json::json!({"a": [1, 2, {"c": null, "b": true}]});
    assert_eq!(
        digest_of(&v),
        "6f6176d83fb6e9e823cced1ea59cdf69f8fa26336eca6cfbe751735e07915e27"
    );
}

#[test]
fn timestamp_canonicalizes_as_z_string() {
    let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
    let cb = CanonicalBytes::new(&serde_json::json!({ "expires_at": ts })).unwrap();
    assert_eq!(cb.as_bytes(), br#"{"expires_at":"2026-01-15T12:00:00Z"}"#);
}

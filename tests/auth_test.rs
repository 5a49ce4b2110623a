//! Integration test for JWT validation.
//!
//! Mints a JWT locally with HS256 and runs it through the same
//! `decode_claims` function the JWKS cache uses in production (there with
//! the provider's RS256 key). No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};

use mwork_backend::auth::jwt::{Claims, decode_claims};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn decoding_key() -> DecodingKey {
    DecodingKey::from_secret(TEST_SECRET.as_bytes())
}

/// Helper: mint a JWT signed with HS256 using the test secret.
fn mint_test_token(sub: &str, email: &str, first: &str, last: &str) -> String {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600, // 1 hour from now
        iat: Some(now),
        iss: Some("https://example.clerk.accounts.dev".to_string()),
        email: Some(email.to_string()),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_valid_token_decodes_correctly() {
    let token = mint_test_token("user_2abc123", "alice@example.com", "Alice", "Smith");

    let claims =
        decode_claims(&token, &decoding_key(), Algorithm::HS256).expect("Token should be valid");

    assert_eq!(claims.sub, "user_2abc123");
    assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    assert_eq!(claims.full_name(), "Alice Smith");
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "user_2expired".to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: Some(now - 3600),
        iss: None,
        email: Some("expired@example.com".to_string()),
        first_name: None,
        last_name: None,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = decode_claims(&token, &decoding_key(), Algorithm::HS256);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint_test_token("user_2bob", "bob@example.com", "Bob", "Jones");

    let wrong_key = DecodingKey::from_secret(b"completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    let result = decode_claims(&token, &wrong_key, Algorithm::HS256);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = decode_claims("not.a.valid.jwt", &decoding_key(), Algorithm::HS256);
    assert!(result.is_err());
}

#[test]
fn test_full_name_with_missing_parts() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "user_2bare".to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some("bare@example.com".to_string()),
        first_name: Some("Chimwemwe".to_string()),
        last_name: None,
    };

    // No trailing whitespace when a part is missing.
    assert_eq!(claims.full_name(), "Chimwemwe");

    let nameless = Claims {
        first_name: None,
        ..claims
    };
    assert_eq!(nameless.full_name(), "");
}

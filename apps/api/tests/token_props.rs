//! Property-based tests for the access token codec, driven through the
//! public issue/verify API only.
//!
//! Developer notes:
//! - Increase cases locally with: PROPTEST_CASES=800 cargo test
//! - Inputs are valid by construction; no prop_assume! filtering.
//!
//! All tests are pure (no HTTP, no shared state) and deterministic apart
//! from the wall clock used as the issuing instant.

mod common;

use std::env;
use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use taskdeck::auth::token::{issue_access_token, verify, TokenError};
use taskdeck::state::security_config::SecurityConfig;

/// Helper to get proptest config from environment
fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(32); // Low default for fast CI

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    // Whatever user the token was minted for is exactly the user that
    // verification reports, under any secret.
    #[test]
    fn round_trip_identifies_the_user(
        user_id in "[a-z0-9-]{1,20}",
        local in "[a-z][a-z0-9.]{0,11}",
        domain in "[a-z]{1,8}",
        secret in "[A-Za-z0-9]{8,32}",
    ) {
        let email = format!("{local}@{domain}.com");
        let security = SecurityConfig::new(secret.as_bytes());
        let now = SystemTime::now();

        let token = issue_access_token(&user_id, &email, now, &security)?;
        let claims = verify(&token, secret.as_bytes(), now)?;

        prop_assert_eq!(&claims.user_id, &user_id);
        prop_assert_eq!(&claims.sub, &user_id);
        prop_assert_eq!(&claims.email, &email);
    }

    // Verifying under any other key is always a signature failure, never a
    // misleading "malformed" or "expired".
    #[test]
    fn wrong_secret_is_always_a_signature_failure(
        secret in "[A-Za-z0-9]{8,32}",
        suffix in "[A-Za-z0-9]{1,8}",
    ) {
        // Distinct by construction: the real secret never contains '#'.
        let other = format!("{secret}#{suffix}");
        let security = SecurityConfig::new(secret.as_bytes());
        let now = SystemTime::now();

        let token = issue_access_token("user-1", "user@example.com", now, &security)?;

        prop_assert_eq!(
            verify(&token, other.as_bytes(), now),
            Err(TokenError::InvalidSignature)
        );
    }

    // Changing any single character of the payload segment invalidates the
    // signature. The MAC covers the encoded text, so even a flip in unused
    // trailing bits must be caught.
    #[test]
    fn any_payload_tampering_is_rejected(idx in any::<prop::sample::Index>()) {
        let security = SecurityConfig::new(b"prop_test_secret".to_vec());
        let now = SystemTime::now();
        let token = issue_access_token("user-1", "user@example.com", now, &security)?;

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        prop_assert_eq!(parts.len(), 3);
        let mut payload = parts[1].as_bytes().to_vec();
        let at = idx.index(payload.len());
        // Always a real change: swap to 'B' where the byte is 'A', 'A' elsewhere.
        payload[at] = if payload[at] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let forged = parts.join(".");

        prop_assert_eq!(
            verify(&forged, &security.jwt_secret, now),
            Err(TokenError::InvalidSignature)
        );
    }

    // The configured lifetime is honored exactly: valid at the expiry
    // instant, rejected one second past it.
    #[test]
    fn configured_ttl_bounds_validity(ttl_secs in 1u64..=3600) {
        let security = SecurityConfig::new(b"prop_test_secret".to_vec())
            .with_access_token_ttl(Duration::from_secs(ttl_secs));
        let now = SystemTime::now();
        let token = issue_access_token("user-1", "user@example.com", now, &security)?;

        let expiry = now + Duration::from_secs(ttl_secs);
        prop_assert!(verify(&token, &security.jwt_secret, expiry).is_ok());
        prop_assert_eq!(
            verify(&token, &security.jwt_secret, expiry + Duration::from_secs(1)),
            Err(TokenError::Expired)
        );
    }
}

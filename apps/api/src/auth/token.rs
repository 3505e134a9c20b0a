//! Access token codec.
//!
//! Signing always uses HS256. Verification accepts the whole HMAC family
//! (HS256/384/512) and nothing else; the algorithm family is checked from the
//! header before any signature work, so a token minted under an asymmetric
//! scheme can never trick the codec into treating the secret as a public key.
//!
//! Expiry and not-before are checked here, against a caller-supplied `now`,
//! rather than inside the JWT library. That keeps clock control in one place
//! and makes the checks testable without sleeping.

use std::time::SystemTime;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::auth::claims::{unix_seconds, Claims};
use crate::state::security_config::SecurityConfig;

/// Why a token failed to mint or verify. Display strings are the diagnostics
/// surfaced in 401 responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token is expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("unexpected signing algorithm")]
    UnsupportedAlgorithm,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Serialize and sign `claims`, stamping `exp` from `expires_at`.
pub fn sign(claims: &Claims, secret: &[u8], expires_at: SystemTime) -> Result<String, TokenError> {
    let mut claims = claims.clone();
    claims.exp = unix_seconds(expires_at);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify `token` against `secret` as of `now`.
///
/// Checks run in a fixed order: algorithm family, then structure and
/// signature, then expiry, then not-before. The first failure wins.
pub fn verify(token: &str, secret: &[u8], now: SystemTime) -> Result<Claims, TokenError> {
    let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
    if !matches!(
        header.alg,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    ) {
        return Err(TokenError::UnsupportedAlgorithm);
    }

    // Timing claims are validated manually below, against the caller's clock.
    let mut validation = Validation::new(header.alg);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(
        |e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm,
            _ => TokenError::Malformed,
        },
    )?;

    let claims = data.claims;
    let now = unix_seconds(now);
    if now > claims.exp {
        return Err(TokenError::Expired);
    }
    if now < claims.nbf {
        return Err(TokenError::NotYetValid);
    }
    Ok(claims)
}

/// Mint an access token for a user as of `now`, using the configured secret,
/// lifetime, issuer, and audience.
pub fn issue_access_token(
    user_id: &str,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, email, security, now);
    sign(&claims, &security.jwt_secret, now + security.access_token_ttl)
}

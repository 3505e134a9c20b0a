//! Access token claims.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::security_config::SecurityConfig;

/// Claim set carried by every access token.
///
/// Field names are the wire names. `user_id` and `email` are application
/// claims; the rest are the registered set. `sub` duplicates `user_id` so
/// standard JWT tooling can resolve the subject without knowing our schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub iss: String,
    pub sub: String,
    pub aud: Vec<String>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Build the claim set for a token issued at `now`.
    ///
    /// `iat` and `nbf` are both `now`; `exp` is `now` plus the configured
    /// lifetime. The token id is assigned here, so signing the same claim set
    /// twice produces tokens that share a `jti`.
    pub fn new(user_id: &str, email: &str, security: &SecurityConfig, now: SystemTime) -> Self {
        let issued_at = unix_seconds(now);
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iss: security.issuer.clone(),
            sub: user_id.to_string(),
            aud: security.audience.clone(),
            exp: issued_at + security.access_token_ttl.as_secs() as i64,
            nbf: issued_at,
            iat: issued_at,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Seconds since the Unix epoch, signed so pre-epoch instants stay total.
pub(crate) fn unix_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}

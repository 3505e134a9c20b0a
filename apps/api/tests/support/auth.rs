//! Token helpers for exercising protected routes.

use std::time::{Duration, SystemTime};

use taskdeck::auth::token::issue_access_token;
use taskdeck::state::security_config::SecurityConfig;

/// Mint a valid access token for the given user id and email.
pub fn mint_test_token(user_id: &str, email: &str, security: &SecurityConfig) -> String {
    issue_access_token(user_id, email, SystemTime::now(), security)
        .expect("should mint token successfully")
}

/// Full `Authorization` header value including the `Bearer ` prefix.
pub fn bearer_header(user_id: &str, email: &str, security: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(user_id, email, security))
}

/// Mint a token whose lifetime ended an hour ago.
pub fn mint_expired_token(user_id: &str, email: &str, security: &SecurityConfig) -> String {
    let past = SystemTime::now() - Duration::from_secs(7200);
    issue_access_token(user_id, email, past, security)
        .expect("should mint expired token successfully")
}

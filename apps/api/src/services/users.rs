//! Account registration and login.

use std::time::SystemTime;

use time::OffsetDateTime;
use tracing::{error, warn};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::auth::{password, token};
use crate::domain::user::User;
use crate::error::ServerError;
use crate::state::app_state::AppState;

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Canonical form used for storage and lookup: trimmed, NFKC-folded,
/// lowercased. Two addresses that normalize identically are the same
/// account.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Create an account. Fails with a conflict when the normalized email is
/// already registered.
pub async fn register(state: &AppState, input: RegisterInput) -> Result<(), ServerError> {
    let email = normalize_email(&input.email);

    let existing = match state.users.find_by_email(&email).await {
        Ok(existing) => existing,
        Err(e) => {
            error!(error = %e, "failed to look up user by email");
            return Err(ServerError::internal("Failed to check existing user"));
        }
    };
    if existing.is_some() {
        warn!(email = %email, "registration for an already registered email");
        return Err(ServerError::conflict(
            "User with the same email already exists",
        ));
    }

    let password_hash = password::hash(&input.password).map_err(|e| {
        error!(error = %e, "failed to hash password");
        ServerError::internal(e.to_string())
    })?;

    let now = OffsetDateTime::now_utc();
    let user = User {
        id: Uuid::new_v4().to_string(),
        email,
        password_hash,
        name: input.name,
        created_at: now,
        updated_at: now,
    };
    if let Err(e) = state.users.insert(user).await {
        error!(error = %e, "failed to store new user");
        return Err(ServerError::internal("Failed to create new user"));
    }
    Ok(())
}

/// Exchange credentials for an access token.
///
/// Unknown email and wrong password are deliberately indistinguishable to
/// the caller.
pub async fn login(state: &AppState, input: LoginInput) -> Result<String, ServerError> {
    let email = normalize_email(&input.email);

    let user = match state.users.find_by_email(&email).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "failed to look up user by email");
            return Err(ServerError::internal("Failed to find user"));
        }
    };
    let user = match user {
        Some(user) => user,
        None => {
            warn!(email = %email, "login for unknown email");
            return Err(ServerError::unauthorized("Invalid email or password"));
        }
    };

    let password_ok = password::verify(&input.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "stored password hash is unusable");
        ServerError::internal("Failed to find user")
    })?;
    if !password_ok {
        warn!(email = %email, "login with wrong password");
        return Err(ServerError::unauthorized("Invalid email or password"));
    }

    token::issue_access_token(&user.id, &user.email, SystemTime::now(), &state.security).map_err(
        |e| {
            error!(error = %e, "failed to mint access token");
            ServerError::internal("Failed to generate JWT token")
        },
    )
}

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

// Re-exports for public API
pub use auth::claims::Claims;
pub use auth::identity::Identity;
pub use auth::token::{issue_access_token, verify, TokenError};
pub use config::{AppConfig, ConfigError};
pub use context::Context;
pub use dispatch::{with_status, BindError, CallParts, FromCall};
pub use error::{render, ErrorBody, ErrorCode, ServerError};
pub use middleware::bearer_auth::BearerAuth;
pub use middleware::cors::cors_middleware;
pub use middleware::request_id::{AssignRequestId, RequestId};
pub use middleware::request_log::RequestLog;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use validation::{Validate, ValidationError};

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::identity::*;
    pub use super::auth::token::*;
    pub use super::dispatch::*;
    pub use super::error::*;
    pub use super::middleware::*;
    pub use super::state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}

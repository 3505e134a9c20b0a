//! Route declarations.
//!
//! Every route is an operation mounted through
//! [`crate::dispatch::with_status`], so binding, validation, and error
//! rendering behave identically everywhere. The task scope carries the
//! bearer-token gate; health and auth are public.

use actix_web::web;
use serde::Serialize;

use crate::middleware::bearer_auth::BearerAuth;

pub mod auth;
pub mod health;
pub mod tasks;

/// Plain acknowledgement body used by mutations that return no entity.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full route table, identical in production and in tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(web::scope("/api/v1/auth").configure(auth::configure_routes));

    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(BearerAuth)
            .configure(tasks::configure_routes),
    );
}

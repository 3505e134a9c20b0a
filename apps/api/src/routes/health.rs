use actix_web::http::StatusCode;
use actix_web::web;
use serde::Serialize;

use crate::context::Context;
use crate::dispatch::{with_status, BindError, CallParts, FromCall};
use crate::error::ServerError;
use crate::validation::{Validate, ValidationError};

/// Marker request: no body, no parameters.
#[derive(Debug, Default)]
pub struct HealthRequest;

impl FromCall for HealthRequest {
    const READS_BODY: bool = false;

    fn bind(_parts: CallParts<'_>) -> Result<Self, BindError> {
        Ok(Self)
    }
}

impl Validate for HealthRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
}

async fn health(_ctx: Context, _req: HealthRequest) -> Result<HealthResponse, ServerError> {
    Ok(HealthResponse {
        status: "ok".to_string(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(with_status(health, StatusCode::OK)));
}

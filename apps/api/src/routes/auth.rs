use actix_web::http::StatusCode;
use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::dispatch::{with_status, BindError, CallParts, FromCall};
use crate::error::ServerError;
use crate::routes::MessageResponse;
use crate::services::users::{self, LoginInput, RegisterInput};
use crate::validation::rules::{email, min_len, required_str};
use crate::validation::{FieldErrors, Validate, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl FromCall for RegisterRequest {
    const READS_BODY: bool = true;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        parts.json()
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("name", required_str(&self.name));
        errors.check(
            "email",
            required_str(&self.email).or_else(|| email(&self.email)),
        );
        errors.check(
            "password",
            required_str(&self.password).or_else(|| min_len(&self.password, 8)),
        );
        errors.finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl FromCall for LoginRequest {
    const READS_BODY: bool = true;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        parts.json()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check(
            "email",
            required_str(&self.email).or_else(|| email(&self.email)),
        );
        errors.check("password", required_str(&self.password));
        errors.finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

async fn register(ctx: Context, req: RegisterRequest) -> Result<MessageResponse, ServerError> {
    let state = ctx.state()?;
    users::register(
        state,
        RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        },
    )
    .await?;
    Ok(MessageResponse::new("User registered successfully"))
}

async fn login(ctx: Context, req: LoginRequest) -> Result<LoginResponse, ServerError> {
    let state = ctx.state()?;
    let access_token = users::login(
        state,
        LoginInput {
            email: req.email,
            password: req.password,
        },
    )
    .await?;
    Ok(LoginResponse { access_token })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/register",
        web::post().to(with_status(register, StatusCode::CREATED)),
    );
    cfg.route("/login", web::post().to(with_status(login, StatusCode::OK)));
}

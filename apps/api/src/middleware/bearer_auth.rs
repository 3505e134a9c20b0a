//! Bearer token gate for protected scopes.
//!
//! Extracts the access token from the `Authorization` header, verifies it,
//! and stores the caller's [`Identity`] in the request extensions before the
//! inner service runs. Any failure short-circuits with a 401 and the inner
//! service never sees the request.
//!
//! Extraction trims the whole header, then splits on the `"Bearer "` marker:
//! the marker must occur exactly once and the token is the piece after it,
//! taken verbatim. Absent headers, foreign schemes, and repeated markers all
//! fail identically, so a probe learns nothing about which part was wrong.

use std::time::SystemTime;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::identity::Identity;
use crate::auth::token;
use crate::error::ServerError;
use crate::state::app_state::AppState;

const INVALID_TOKEN: &str = "invalid token";

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware { service }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Header and state are read before req is moved anywhere.
        let bearer = bearer_token(req.headers().get(header::AUTHORIZATION));
        let token = match bearer {
            Ok(token) => token,
            Err(e) => return Box::pin(async move { Err(e.into()) }),
        };

        let state = match req.app_data::<web::Data<AppState>>().cloned() {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(ServerError::internal("application state not available").into())
                });
            }
        };

        match token::verify(&token, &state.security.jwt_secret, SystemTime::now()) {
            Ok(claims) => {
                // Identity must be in place before the inner service runs.
                req.extensions_mut().insert(Identity {
                    user_id: claims.user_id,
                    email: claims.email,
                });
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => Box::pin(async move { Err(ServerError::unauthorized(e.to_string()).into()) }),
        }
    }
}

/// Pull the token out of an `Authorization` header value.
fn bearer_token(header_value: Option<&header::HeaderValue>) -> Result<String, ServerError> {
    let value = match header_value {
        Some(value) => value,
        None => return Err(ServerError::unauthorized(INVALID_TOKEN)),
    };
    let raw = value
        .to_str()
        .map_err(|_| ServerError::unauthorized(INVALID_TOKEN))?;

    let parts: Vec<&str> = raw.trim().split("Bearer ").collect();
    if parts.len() != 2 {
        return Err(ServerError::unauthorized(INVALID_TOKEN));
    }
    Ok(parts[1].to_string())
}

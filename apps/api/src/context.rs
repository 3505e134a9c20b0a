//! Per-call context handed to operations.

use actix_web::web::Data;
use actix_web::HttpRequest;

use crate::auth::identity::Identity;
use crate::error::ServerError;
use crate::state::app_state::AppState;

/// Everything an operation may reach beyond its own payload: the underlying
/// request, shared application state, and the verified caller identity when
/// the route sits behind the auth gate.
///
/// Built by the dispatcher for every call; operations receive it by value and
/// it is dropped when the call future completes.
pub struct Context {
    req: HttpRequest,
    identity: Option<Identity>,
}

impl Context {
    pub(crate) fn new(req: HttpRequest, identity: Option<Identity>) -> Self {
        Self { req, identity }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.req
    }

    /// Caller identity, if the auth gate ran for this route.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Caller identity, required. On unauthenticated routes this is a 401,
    /// not a panic, so an operation mistakenly mounted outside the gate fails
    /// closed.
    pub fn require_identity(&self) -> Result<&Identity, ServerError> {
        self.identity
            .as_ref()
            .ok_or_else(|| ServerError::unauthorized("user ID not found in context"))
    }

    /// Shared application state.
    pub fn state(&self) -> Result<&AppState, ServerError> {
        self.req
            .app_data::<Data<AppState>>()
            .map(|data| data.get_ref())
            .ok_or_else(|| ServerError::internal("application state not available"))
    }
}

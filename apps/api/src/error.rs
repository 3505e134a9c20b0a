//! Error taxonomy and wire contract.
//!
//! Every failure that crosses the HTTP boundary is a [`ServerError`]: a closed
//! [`ErrorCode`] plus a human-readable message. The code alone decides the
//! HTTP status; callers never pick status codes ad hoc. Add new codes here,
//! never pass raw strings around.

use core::fmt;
use std::error::Error as StdError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of error codes exposed by the API.
///
/// Each variant maps 1:1 to the SCREAMING_SNAKE_CASE string that appears in
/// HTTP responses and to exactly one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed payload or failed validation
    BadRequest,
    /// Missing, malformed, or rejected credentials
    Unauthorized,
    /// Authenticated but not allowed (reserved; not emitted by this core)
    Forbidden,
    /// Resource absent, or present but not owned by the caller
    NotFound,
    /// State conflict, e.g. duplicate registration
    Conflict,
    /// Throttled (reserved for rate-limiting collaborators)
    TooManyRequests,
    /// Dependency unavailable (reserved for infrastructure collaborators)
    ServiceUnavailable,
    /// Anything unanticipated
    InternalServerError,
}

impl ErrorCode {
    /// All codes, for exhaustiveness checks in tests.
    pub const ALL: [ErrorCode; 8] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::TooManyRequests,
        Self::ServiceUnavailable,
        Self::InternalServerError,
    ];

    /// Canonical wire string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// The single status this code renders as.
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Inverse of [`ErrorCode::as_str`].
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    /// Status for an arbitrary code string. Unknown strings collapse to 500
    /// rather than leaking a guess.
    pub fn status_for(code: &str) -> StatusCode {
        Self::parse(code).map_or(StatusCode::INTERNAL_SERVER_ERROR, |c| c.http_status())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The one error type operations and middleware return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServerError {
    pub code: ErrorCode,
    pub message: String,
}

impl ServerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TooManyRequests, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Map any error to its `(status, body)` rendering.
///
/// A [`ServerError`] renders through its code's status table. Anything else
/// is an unanticipated failure and renders as 500 with the error's own text.
pub fn render(err: &(dyn StdError + 'static)) -> (StatusCode, ErrorBody) {
    match err.downcast_ref::<ServerError>() {
        Some(server_err) => (
            server_err.code.http_status(),
            ErrorBody {
                code: server_err.code.as_str().to_string(),
                message: server_err.message.clone(),
            },
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                code: ErrorCode::InternalServerError.as_str().to_string(),
                message: err.to_string(),
            },
        ),
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        self.code.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let (status, body) = render(self);
        HttpResponse::build(status).json(body)
    }
}

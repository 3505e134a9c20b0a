//! Request dispatch: bind, validate, invoke, respond.
//!
//! [`with_status`] turns an operation — an async `(Context, Request) ->
//! Result<Response, ServerError>` function — into an actix handler. The
//! pipeline is the same for every route:
//!
//! 1. read the body, only if the request type declares it reads one
//! 2. bind the payload ([`FromCall::bind`]); failure is a uniform 400
//! 3. validate ([`crate::validation::Validate`]); failure is a 400 carrying
//!    the field messages
//! 4. invoke the operation exactly once
//! 5. serialize the success value with the route's fixed status
//!
//! Errors short-circuit: a request that fails binding or validation never
//! reaches the operation. Cancelled calls drop the whole future, so the
//! operation is never left running detached.

use std::future::Future;

use actix_web::http::StatusCode;
use actix_web::web::{Payload, Query};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use bytes::{Bytes, BytesMut};
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::auth::identity::Identity;
use crate::context::Context;
use crate::error::ServerError;
use crate::validation::Validate;

/// Uniform message for anything wrong with the payload's shape. Details go
/// to the log, not the client.
const INVALID_REQUEST_FORMAT: &str = "invalid request format";

/// Why binding failed. Internal diagnostics only; clients always see
/// [`INVALID_REQUEST_FORMAT`].
#[derive(Debug, Error)]
pub enum BindError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing path parameter {0:?}")]
    MissingParam(&'static str),
    #[error("invalid query string: {0}")]
    Query(actix_web::error::QueryPayloadError),
    #[error("request type reads no body")]
    NoBody,
}

/// Raw material a request type binds from.
pub struct CallParts<'a> {
    req: &'a HttpRequest,
    body: Option<&'a [u8]>,
}

impl<'a> CallParts<'a> {
    pub fn new(req: &'a HttpRequest, body: Option<&'a [u8]>) -> Self {
        Self { req, body }
    }

    pub fn request(&self) -> &HttpRequest {
        self.req
    }

    /// Deserialize the JSON body.
    ///
    /// An empty body binds to the type's default, mirroring how absent JSON
    /// fields bind to field defaults; validation then reports the missing
    /// fields by name instead of a generic parse error.
    pub fn json<B>(&self) -> Result<B, BindError>
    where
        B: DeserializeOwned + Default,
    {
        let bytes = self.body.ok_or(BindError::NoBody)?;
        if bytes.is_empty() {
            return Ok(B::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// A path parameter by name.
    pub fn param(&self, name: &'static str) -> Result<String, BindError> {
        self.req
            .match_info()
            .get(name)
            .map(str::to_string)
            .ok_or(BindError::MissingParam(name))
    }

    /// Deserialize the query string.
    pub fn query<Q>(&self) -> Result<Q, BindError>
    where
        Q: DeserializeOwned,
    {
        Query::<Q>::from_query(self.req.query_string())
            .map(Query::into_inner)
            .map_err(BindError::Query)
    }
}

/// A request type that can be bound from a call.
///
/// `READS_BODY` is declared per type, at compile time: marker and path-only
/// request types set it to `false` and the dispatcher never touches the
/// payload stream for them.
pub trait FromCall: Sized {
    const READS_BODY: bool;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError>;
}

/// Wrap an operation into an actix handler with a fixed success status.
pub fn with_status<Op, Fut, R, T>(
    op: Op,
    status: StatusCode,
) -> impl Fn(HttpRequest, web::Payload) -> LocalBoxFuture<'static, Result<HttpResponse, ServerError>>
       + Clone
       + 'static
where
    Op: Fn(Context, R) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ServerError>> + 'static,
    R: FromCall + Validate + 'static,
    T: Serialize,
{
    move |req: HttpRequest, payload: web::Payload| {
        let op = op.clone();
        Box::pin(async move {
            let body = if R::READS_BODY {
                Some(read_body(payload).await?)
            } else {
                None
            };

            let request = match R::bind(CallParts::new(&req, body.as_deref())) {
                Ok(request) => request,
                Err(e) => {
                    warn!(
                        http.method = %req.method(),
                        url.path = %req.path(),
                        error = %e,
                        "failed to bind request"
                    );
                    return Err(ServerError::bad_request(INVALID_REQUEST_FORMAT));
                }
            };

            if let Err(e) = request.validate() {
                warn!(
                    http.method = %req.method(),
                    url.path = %req.path(),
                    error = %e,
                    "request validation failed"
                );
                return Err(ServerError::bad_request(e.message()));
            }

            let identity = req.extensions().get::<Identity>().cloned();
            let ctx = Context::new(req, identity);
            let response = op(ctx, request).await?;
            Ok(HttpResponse::build(status).json(response))
        })
    }
}

async fn read_body(mut payload: Payload) -> Result<Bytes, ServerError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            ServerError::bad_request(INVALID_REQUEST_FORMAT)
        })?;
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

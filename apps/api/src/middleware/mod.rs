//! HTTP middleware: auth gate, request id, request logging, CORS.

pub mod bearer_auth;
pub mod cors;
pub mod request_id;
pub mod request_log;

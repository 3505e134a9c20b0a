//! Storage traits and their in-memory implementations.
//!
//! Services depend on the traits only; the in-memory stores are the shipped
//! backend and double as test fixtures. Lock guards are never held across an
//! await point.

pub mod tasks;
pub mod users;

use thiserror::Error;

/// A storage backend failure. Services log it and translate it into an
/// internal [`crate::error::ServerError`]; the text never reaches clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RepoError(pub String);

//! Shared helpers for unit and integration tests.
//!
//! Keeps test plumbing out of the application crate: logging bootstrap,
//! unique value generation, and assertions for the error wire contract.

pub mod error_body;
pub mod logging;
pub mod unique;

pub use error_body::{assert_error_body, assert_error_body_contains, read_error_body};
pub use unique::{unique_email, unique_str};

#![allow(dead_code)]

pub mod app;
pub mod auth;

// Re-export only what current tests actually import
pub use app::{call_rejected, spawn_app, test_state, TEST_SECRET};
pub use auth::{bearer_header, mint_expired_token, mint_test_token};

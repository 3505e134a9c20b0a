//! Shared application state.

use std::sync::Arc;

use crate::repos::tasks::{MemoryTasks, TaskRepo};
use crate::repos::users::{MemoryUsers, UserRepo};
use crate::state::security_config::SecurityConfig;

/// Everything handlers share: security settings and the storage backends.
/// Cloning is cheap; the repositories are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub security: SecurityConfig,
    pub users: Arc<dyn UserRepo>,
    pub tasks: Arc<dyn TaskRepo>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The repositories are trait objects and the security config holds the
        // JWT secret, so print neither.
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        users: Arc<dyn UserRepo>,
        tasks: Arc<dyn TaskRepo>,
    ) -> Self {
        Self {
            security,
            users,
            tasks,
        }
    }

    /// State backed by the in-memory stores; used by `main` and by tests.
    pub fn in_memory(security: SecurityConfig) -> Self {
        Self::new(
            security,
            Arc::new(MemoryUsers::default()),
            Arc::new(MemoryTasks::default()),
        )
    }
}

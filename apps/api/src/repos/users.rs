//! User storage.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::user::User;
use crate::repos::RepoError;

/// Callers pass emails already normalized; lookup is an exact match.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn insert(&self, user: User) -> Result<(), RepoError>;
}

/// In-memory user store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryUsers {
    rows: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepo for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read();
        Ok(rows.values().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), RepoError> {
        self.rows.write().insert(user.id.clone(), user);
        Ok(())
    }
}

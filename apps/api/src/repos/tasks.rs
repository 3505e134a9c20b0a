//! Task storage.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::domain::task::{Task, TaskPriority, TaskStatus};
use crate::repos::RepoError;

#[async_trait]
pub trait TaskRepo: Send + Sync {
    async fn insert(&self, task: Task) -> Result<(), RepoError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, RepoError>;
    /// All tasks for one user, newest first (id breaks creation-time ties).
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Task>, RepoError>;
    async fn update(
        &self,
        id: &str,
        title: &str,
        description: &str,
        priority: TaskPriority,
        updated_at: OffsetDateTime,
    ) -> Result<(), RepoError>;
    async fn update_status(
        &self,
        id: &str,
        status: TaskStatus,
        updated_at: OffsetDateTime,
    ) -> Result<(), RepoError>;
    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}

/// In-memory task store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryTasks {
    rows: RwLock<HashMap<String, Task>>,
}

#[async_trait]
impl TaskRepo for MemoryTasks {
    async fn insert(&self, task: Task) -> Result<(), RepoError> {
        self.rows.write().insert(task.id.clone(), task);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, RepoError> {
        Ok(self.rows.read().get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Task>, RepoError> {
        let mut tasks: Vec<Task> = {
            let rows = self.rows.read();
            rows.values()
                .filter(|task| task.user_id == user_id)
                .cloned()
                .collect()
        };
        tasks.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(tasks)
    }

    async fn update(
        &self,
        id: &str,
        title: &str,
        description: &str,
        priority: TaskPriority,
        updated_at: OffsetDateTime,
    ) -> Result<(), RepoError> {
        let mut rows = self.rows.write();
        let task = rows
            .get_mut(id)
            .ok_or_else(|| RepoError("no rows affected".to_string()))?;
        task.title = title.to_string();
        task.description = description.to_string();
        task.priority = priority;
        task.updated_at = updated_at;
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: TaskStatus,
        updated_at: OffsetDateTime,
    ) -> Result<(), RepoError> {
        let mut rows = self.rows.write();
        let task = rows
            .get_mut(id)
            .ok_or_else(|| RepoError("no rows affected".to_string()))?;
        task.status = status;
        task.updated_at = updated_at;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let mut rows = self.rows.write();
        rows.remove(id)
            .map(|_| ())
            .ok_or_else(|| RepoError("no rows affected".to_string()))
    }
}

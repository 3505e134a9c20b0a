//! Task operations, always scoped to the calling user.
//!
//! Ownership is enforced here: a task that exists but belongs to someone
//! else is reported as not found, never as forbidden, so the API does not
//! confirm the existence of other users' tasks.

use time::OffsetDateTime;
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::task::{Task, TaskPriority, TaskStatus};
use crate::error::ServerError;
use crate::state::app_state::AppState;

pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
    pub priority: i32,
}

pub struct UpdateTaskInput {
    pub title: String,
    pub description: String,
    pub priority: i32,
}

pub async fn create(
    state: &AppState,
    user_id: &str,
    input: CreateTaskInput,
) -> Result<(), ServerError> {
    let priority = TaskPriority::try_from(input.priority).map_err(|e| {
        warn!(priority = input.priority, "invalid task priority");
        ServerError::bad_request(e.to_string())
    })?;

    let now = OffsetDateTime::now_utc();
    let task = Task {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        title: input.title,
        description: input.description,
        priority,
        status: TaskStatus::Todo,
        created_at: now,
        updated_at: now,
    };
    if let Err(e) = state.tasks.insert(task).await {
        error!(error = %e, "failed to store task");
        return Err(ServerError::internal("Failed to create task"));
    }
    Ok(())
}

/// Fetch one task, requiring ownership.
pub async fn find_by_id(
    state: &AppState,
    task_id: &str,
    user_id: &str,
) -> Result<Task, ServerError> {
    let task = match state.tasks.find_by_id(task_id).await {
        Ok(task) => task,
        Err(e) => {
            error!(task_id, error = %e, "failed to load task");
            return Err(ServerError::internal("Failed to find task"));
        }
    };
    let task = match task {
        Some(task) => task,
        None => {
            warn!(task_id, "task does not exist");
            return Err(ServerError::not_found("Task not found"));
        }
    };
    if task.user_id != user_id {
        warn!(task_id, user_id, "task belongs to another user");
        return Err(ServerError::not_found("Task not found"));
    }
    Ok(task)
}

/// The caller's tasks, newest first, optionally filtered by status.
pub async fn list_for_user(
    state: &AppState,
    user_id: &str,
    status: Option<TaskStatus>,
) -> Result<Vec<Task>, ServerError> {
    let tasks = match state.tasks.find_by_user(user_id).await {
        Ok(tasks) => tasks,
        Err(e) => {
            error!(user_id, error = %e, "failed to list tasks");
            return Err(ServerError::internal("Failed to find tasks"));
        }
    };
    Ok(match status {
        Some(wanted) => tasks.into_iter().filter(|t| t.status == wanted).collect(),
        None => tasks,
    })
}

pub async fn update(
    state: &AppState,
    task_id: &str,
    user_id: &str,
    input: UpdateTaskInput,
) -> Result<(), ServerError> {
    // Range check precedes the existence check: a bad priority is reported
    // as such even when the task id is bogus too.
    let priority = TaskPriority::try_from(input.priority).map_err(|e| {
        warn!(priority = input.priority, "invalid task priority");
        ServerError::bad_request(e.to_string())
    })?;

    find_by_id(state, task_id, user_id).await?;

    if let Err(e) = state
        .tasks
        .update(
            task_id,
            &input.title,
            &input.description,
            priority,
            OffsetDateTime::now_utc(),
        )
        .await
    {
        error!(task_id, error = %e, "failed to update task");
        return Err(ServerError::internal("Failed to update task"));
    }
    Ok(())
}

pub async fn update_status(
    state: &AppState,
    task_id: &str,
    user_id: &str,
    status: &str,
) -> Result<(), ServerError> {
    let status: TaskStatus = match status.parse() {
        Ok(status) => status,
        Err(e) => {
            warn!(status, "invalid task status");
            return Err(ServerError::bad_request(e.to_string()));
        }
    };

    find_by_id(state, task_id, user_id).await?;

    if let Err(e) = state
        .tasks
        .update_status(task_id, status, OffsetDateTime::now_utc())
        .await
    {
        error!(task_id, error = %e, "failed to update task status");
        return Err(ServerError::internal("Failed to update task status"));
    }
    Ok(())
}

pub async fn delete(state: &AppState, task_id: &str, user_id: &str) -> Result<(), ServerError> {
    find_by_id(state, task_id, user_id).await?;

    if let Err(e) = state.tasks.delete(task_id).await {
        error!(task_id, error = %e, "failed to delete task");
        return Err(ServerError::internal("Failed to delete task"));
    }
    Ok(())
}

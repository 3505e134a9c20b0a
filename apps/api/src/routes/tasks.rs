use actix_web::http::StatusCode;
use actix_web::web;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::context::Context;
use crate::dispatch::{with_status, BindError, CallParts, FromCall};
use crate::domain::task::{Task, TaskPriority, TaskStatus};
use crate::error::ServerError;
use crate::routes::MessageResponse;
use crate::services::tasks::{self, CreateTaskInput, UpdateTaskInput};
use crate::validation::rules::{max_i32, min_i32, required_i32, required_str};
use crate::validation::{FieldErrors, Validate, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub priority: i32,
}

impl FromCall for CreateTaskRequest {
    const READS_BODY: bool = true;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        parts.json()
    }
}

impl Validate for CreateTaskRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("title", required_str(&self.title));
        errors.check("description", required_str(&self.description));
        errors.check(
            "priority",
            required_i32(self.priority)
                .or_else(|| min_i32(self.priority, 1))
                .or_else(|| max_i32(self.priority, 3)),
        );
        errors.finish()
    }
}

/// Query-only request: `GET /api/v1/tasks?status=IN_PROGRESS`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListTasksRequest {
    pub status: Option<TaskStatus>,
}

impl FromCall for ListTasksRequest {
    const READS_BODY: bool = false;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        parts.query()
    }
}

impl Validate for ListTasksRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Path-only request; carries no body at all.
#[derive(Debug)]
pub struct GetTaskRequest {
    pub id: String,
}

impl FromCall for GetTaskRequest {
    const READS_BODY: bool = false;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        Ok(Self {
            id: parts.param("id")?,
        })
    }
}

impl Validate for GetTaskRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("id", required_str(&self.id));
        errors.finish()
    }
}

/// Body plus the `{id}` path parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: i32,
}

impl FromCall for UpdateTaskRequest {
    const READS_BODY: bool = true;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        let mut request: Self = parts.json()?;
        request.id = parts.param("id")?;
        Ok(request)
    }
}

impl Validate for UpdateTaskRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("id", required_str(&self.id));
        errors.check("title", required_str(&self.title));
        errors.check("description", required_str(&self.description));
        errors.check(
            "priority",
            required_i32(self.priority)
                .or_else(|| min_i32(self.priority, 1))
                .or_else(|| max_i32(self.priority, 3)),
        );
        errors.finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskStatusRequest {
    #[serde(skip)]
    pub id: String,
    pub status: String,
}

impl FromCall for UpdateTaskStatusRequest {
    const READS_BODY: bool = true;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        let mut request: Self = parts.json()?;
        request.id = parts.param("id")?;
        Ok(request)
    }
}

impl Validate for UpdateTaskStatusRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("id", required_str(&self.id));
        errors.check("status", required_str(&self.status));
        errors.finish()
    }
}

#[derive(Debug)]
pub struct DeleteTaskRequest {
    pub id: String,
}

impl FromCall for DeleteTaskRequest {
    const READS_BODY: bool = false;

    fn bind(parts: CallParts<'_>) -> Result<Self, BindError> {
        Ok(Self {
            id: parts.param("id")?,
        })
    }
}

impl Validate for DeleteTaskRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check("id", required_str(&self.id));
        errors.finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

async fn create(ctx: Context, req: CreateTaskRequest) -> Result<MessageResponse, ServerError> {
    let user_id = ctx.require_identity()?.user_id.clone();
    let state = ctx.state()?;
    tasks::create(
        state,
        &user_id,
        CreateTaskInput {
            title: req.title,
            description: req.description,
            priority: req.priority,
        },
    )
    .await?;
    Ok(MessageResponse::new("Task created successfully"))
}

async fn list(ctx: Context, req: ListTasksRequest) -> Result<Vec<TaskResponse>, ServerError> {
    let user_id = ctx.require_identity()?.user_id.clone();
    let state = ctx.state()?;
    let tasks = tasks::list_for_user(state, &user_id, req.status).await?;
    Ok(tasks.into_iter().map(TaskResponse::from).collect())
}

async fn get(ctx: Context, req: GetTaskRequest) -> Result<TaskResponse, ServerError> {
    let user_id = ctx.require_identity()?.user_id.clone();
    let state = ctx.state()?;
    let task = tasks::find_by_id(state, &req.id, &user_id).await?;
    Ok(task.into())
}

async fn update(ctx: Context, req: UpdateTaskRequest) -> Result<MessageResponse, ServerError> {
    let user_id = ctx.require_identity()?.user_id.clone();
    let state = ctx.state()?;
    let UpdateTaskRequest {
        id,
        title,
        description,
        priority,
    } = req;
    tasks::update(
        state,
        &id,
        &user_id,
        UpdateTaskInput {
            title,
            description,
            priority,
        },
    )
    .await?;
    Ok(MessageResponse::new("Task updated successfully"))
}

async fn update_status(
    ctx: Context,
    req: UpdateTaskStatusRequest,
) -> Result<MessageResponse, ServerError> {
    let user_id = ctx.require_identity()?.user_id.clone();
    let state = ctx.state()?;
    tasks::update_status(state, &req.id, &user_id, &req.status).await?;
    Ok(MessageResponse::new("Task status updated successfully"))
}

async fn delete(ctx: Context, req: DeleteTaskRequest) -> Result<MessageResponse, ServerError> {
    let user_id = ctx.require_identity()?.user_id.clone();
    let state = ctx.state()?;
    tasks::delete(state, &req.id, &user_id).await?;
    Ok(MessageResponse::new("Task deleted successfully"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(with_status(create, StatusCode::CREATED)));
    cfg.route("", web::get().to(with_status(list, StatusCode::OK)));
    cfg.route("/{id}", web::get().to(with_status(get, StatusCode::OK)));
    cfg.route("/{id}", web::put().to(with_status(update, StatusCode::OK)));
    cfg.route(
        "/{id}/status",
        web::patch().to(with_status(update_status, StatusCode::OK)),
    );
    cfg.route(
        "/{id}",
        web::delete().to(with_status(delete, StatusCode::OK)),
    );
}

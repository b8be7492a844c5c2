// rest/routes/tasks.rs — Task collection and item handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::rest::error::ApiError;
use crate::tasks::validate::validate_task_body;
use crate::tasks::{TaskListParams, TaskRow};
use crate::AppContext;

/// GET /api/tasks/ — every task, newest first. `[]` when there are none.
pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<TaskRow>>, ApiError> {
    let rows = ctx.tasks.list(&TaskListParams::default()).await?;
    Ok(Json(rows))
}

/// POST /api/tasks/ — validate, insert, 201 with the fresh task.
/// Validation failure is a 400 with the field-error map; nothing is written.
pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<TaskRow>), ApiError> {
    let draft = validate_task_body(&body)?;
    let task = ctx.tasks.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}/
pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<TaskRow>, ApiError> {
    match ctx.tasks.get(&id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

/// PUT /api/tasks/{id}/ — full replacement of the mutable fields.
/// Unknown id wins over a bad body: 404 first, then validation.
pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<TaskRow>, ApiError> {
    if ctx.tasks.get(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let draft = validate_task_body(&body)?;
    let task = ctx.tasks.update(&id, &draft).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}/ — hard delete, 204 empty body.
pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ctx.tasks.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

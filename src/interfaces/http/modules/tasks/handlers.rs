//! Maintenance task handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::maintenance::MaintenanceService;
use crate::domain::maintenance::MaintenanceTask;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};
use crate::shared::non_blank;

#[derive(Clone)]
pub struct TaskHandlerState {
    pub maintenance: Arc<MaintenanceService>,
}

fn to_dtos(tasks: Vec<MaintenanceTask>) -> Vec<TaskDto> {
    tasks.into_iter().map(TaskDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = ApiResponse<TaskDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Task ID already exists")
    )
)]
pub async fn create_task(
    State(state): State<TaskHandlerState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaskDto>>), ApiError> {
    created(state.maintenance.create(request.into()).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses((status = 200, description = "All tasks", body = ApiResponse<Vec<TaskDto>>))
)]
pub async fn list_tasks(State(state): State<TaskHandlerState>) -> ApiResult<Vec<TaskDto>> {
    ok(to_dtos(state.maintenance.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task", body = ApiResponse<TaskDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_task(State(state): State<TaskHandlerState>, Path(id): Path<String>) -> ApiResult<TaskDto> {
    ok(state.maintenance.get(&id).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = ApiResponse<TaskDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<TaskDto> {
    ok(state.maintenance.update(&id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.maintenance.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/tasks/by-status/{status}",
    tag = "Tasks",
    params(("status" = String, Path, description = "Task status")),
    responses(
        (status = 200, description = "Tasks in the status", body = ApiResponse<Vec<TaskDto>>),
        (status = 400, description = "Invalid status")
    )
)]
pub async fn by_status(
    State(state): State<TaskHandlerState>,
    Path(status): Path<String>,
) -> ApiResult<Vec<TaskDto>> {
    ok(to_dtos(state.maintenance.by_status(&status).await?))
}

#[utoipa::path(
    get,
    path = "/api/tasks/by-statuses/{statuses}",
    tag = "Tasks",
    params(("statuses" = String, Path, description = "Comma-separated statuses")),
    responses(
        (status = 200, description = "Tasks in any of the statuses", body = ApiResponse<Vec<TaskDto>>),
        (status = 400, description = "Invalid status")
    )
)]
pub async fn by_statuses(
    State(state): State<TaskHandlerState>,
    Path(statuses): Path<String>,
) -> ApiResult<Vec<TaskDto>> {
    ok(to_dtos(state.maintenance.by_statuses(&statuses).await?))
}

#[utoipa::path(
    get,
    path = "/api/tasks/by-priority/{priority}",
    tag = "Tasks",
    params(("priority" = String, Path, description = "Task priority")),
    responses(
        (status = 200, description = "Tasks with the priority", body = ApiResponse<Vec<TaskDto>>),
        (status = 400, description = "Invalid priority")
    )
)]
pub async fn by_priority(
    State(state): State<TaskHandlerState>,
    Path(priority): Path<String>,
) -> ApiResult<Vec<TaskDto>> {
    ok(to_dtos(state.maintenance.by_priority(&priority).await?))
}

#[utoipa::path(
    get,
    path = "/api/tasks/by-technician/{id}",
    tag = "Tasks",
    params(("id" = i64, Path, description = "Technician ID")),
    responses((status = 200, description = "Tasks assigned to the technician", body = ApiResponse<Vec<TaskDto>>))
)]
pub async fn by_technician(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<TaskDto>> {
    ok(to_dtos(state.maintenance.by_technician(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/tasks/by-technician/{id}/stats",
    tag = "Tasks",
    params(("id" = i64, Path, description = "Technician ID")),
    responses((status = 200, description = "Task counts by status", body = ApiResponse<TechnicianStatsDto>))
)]
pub async fn technician_stats(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<TechnicianStatsDto> {
    ok(state.maintenance.technician_stats(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/tasks/overdue",
    tag = "Tasks",
    responses((status = 200, description = "Unfinished tasks past their due date", body = ApiResponse<Vec<TaskDto>>))
)]
pub async fn overdue(State(state): State<TaskHandlerState>) -> ApiResult<Vec<TaskDto>> {
    ok(to_dtos(state.maintenance.overdue().await?))
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/status",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = TaskStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<TaskDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_status(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<TaskStatusRequest>,
) -> ApiResult<TaskDto> {
    let status = non_blank(request.status.as_deref())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;
    ok(state.maintenance.update_status(&id, status).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/technician",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = TechnicianRequest,
    responses(
        (status = 200, description = "Technician assigned or removed", body = ApiResponse<TaskDto>),
        (status = 400, description = "Staff member is not a technician"),
        (status = 404, description = "Task or technician not found")
    )
)]
pub async fn set_technician(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<TechnicianRequest>,
) -> ApiResult<TaskDto> {
    ok(state
        .maintenance
        .set_technician(&id, request.technician_id)
        .await?
        .into())
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/completion",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = CompletionRequest,
    responses(
        (status = 200, description = "Completion updated", body = ApiResponse<TaskDto>),
        (status = 400, description = "Percentage outside 0..=100"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_completion(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<CompletionRequest>,
) -> ApiResult<TaskDto> {
    let percentage = request
        .completion_percentage
        .ok_or_else(|| ApiError::bad_request("Completion percentage is required"))?;
    ok(state.maintenance.update_completion(&id, percentage).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/tasks/{id}/skills",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = SkillRequest,
    responses(
        (status = 200, description = "Skill added", body = ApiResponse<TaskDto>),
        (status = 400, description = "Empty skill")
    )
)]
pub async fn add_skill(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<SkillRequest>,
) -> ApiResult<TaskDto> {
    let skill = request.skill.unwrap_or_default();
    ok(state.maintenance.add_skill(&id, &skill).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/tasks/{id}/parts",
    tag = "Tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = PartRequest,
    responses(
        (status = 200, description = "Part added", body = ApiResponse<TaskDto>),
        (status = 400, description = "Empty part")
    )
)]
pub async fn add_part(
    State(state): State<TaskHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<PartRequest>,
) -> ApiResult<TaskDto> {
    let part = request.part.unwrap_or_default();
    ok(state.maintenance.add_part(&id, &part).await?.into())
}

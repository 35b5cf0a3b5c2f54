//! Schedule handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::scheduling::ScheduleService;
use crate::domain::schedule::Schedule;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct ScheduleHandlerState {
    pub schedules: Arc<ScheduleService>,
}

fn to_dtos(schedules: Vec<Schedule>) -> Vec<ScheduleDto> {
    schedules.into_iter().map(ScheduleDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/schedule-buses",
    tag = "Schedules",
    responses((status = 200, description = "All schedules", body = ApiResponse<Vec<ScheduleDto>>))
)]
pub async fn list_schedules(State(state): State<ScheduleHandlerState>) -> ApiResult<Vec<ScheduleDto>> {
    ok(to_dtos(state.schedules.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/schedule-buses/{id}",
    tag = "Schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = ApiResponse<ScheduleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_schedule(
    State(state): State<ScheduleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<ScheduleDto> {
    ok(state.schedules.get(id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/schedule-buses",
    tag = "Schedules",
    request_body = ScheduleRequest,
    responses(
        (status = 201, description = "Schedule created and driver emailed", body = ApiResponse<ScheduleDto>),
        (status = 400, description = "Missing fields or unknown bus, driver or route")
    )
)]
pub async fn create_schedule(
    State(state): State<ScheduleHandlerState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleDto>>), ApiError> {
    created(state.schedules.create(request.into()).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/schedule-buses/{id}",
    tag = "Schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    request_body = ScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ApiResponse<ScheduleDto>),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_schedule(
    State(state): State<ScheduleHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<ScheduleRequest>,
) -> ApiResult<ScheduleDto> {
    ok(state.schedules.update(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/schedule-buses/{id}",
    tag = "Schedules",
    params(("id" = i64, Path, description = "Schedule ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_schedule(
    State(state): State<ScheduleHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/schedule-buses/bus/{bus_id}",
    tag = "Schedules",
    params(("bus_id" = i64, Path, description = "Bus ID")),
    responses((status = 200, description = "Schedules of the bus", body = ApiResponse<Vec<ScheduleDto>>))
)]
pub async fn by_bus(
    State(state): State<ScheduleHandlerState>,
    Path(bus_id): Path<i64>,
) -> ApiResult<Vec<ScheduleDto>> {
    ok(to_dtos(state.schedules.by_bus(bus_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/schedule-buses/day/{day}",
    tag = "Schedules",
    params(("day" = String, Path, description = "MONDAY..SUNDAY")),
    responses(
        (status = 200, description = "Schedules on that day", body = ApiResponse<Vec<ScheduleDto>>),
        (status = 400, description = "Invalid day")
    )
)]
pub async fn by_day(
    State(state): State<ScheduleHandlerState>,
    Path(day): Path<String>,
) -> ApiResult<Vec<ScheduleDto>> {
    ok(to_dtos(state.schedules.by_day(&day).await?))
}

//! Emergency report handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::emergency::EmergencyService;
use crate::domain::emergency::EmergencyReport;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};
use crate::shared::non_blank;

#[derive(Clone)]
pub struct EmergencyHandlerState {
    pub emergencies: Arc<EmergencyService>,
}

fn to_dtos(reports: Vec<EmergencyReport>) -> Vec<EmergencyReportDto> {
    reports.into_iter().map(EmergencyReportDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/emergency-reports",
    tag = "Emergencies",
    request_body = EmergencyRequest,
    responses(
        (status = 201, description = "Report filed", body = ApiResponse<EmergencyReportDto>),
        (status = 400, description = "Missing fields, unknown driver or invalid type/severity")
    )
)]
pub async fn report(
    State(state): State<EmergencyHandlerState>,
    Json(request): Json<EmergencyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmergencyReportDto>>), ApiError> {
    created(state.emergencies.report(request.into()).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/emergency-reports",
    tag = "Emergencies",
    responses((status = 200, description = "All reports, newest first", body = ApiResponse<Vec<EmergencyReportDto>>))
)]
pub async fn list_reports(State(state): State<EmergencyHandlerState>) -> ApiResult<Vec<EmergencyReportDto>> {
    ok(to_dtos(state.emergencies.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/emergency-reports/{id}",
    tag = "Emergencies",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report", body = ApiResponse<EmergencyReportDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_report(
    State(state): State<EmergencyHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<EmergencyReportDto> {
    ok(state.emergencies.get(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/emergency-reports/driver/{driver_id}",
    tag = "Emergencies",
    params(("driver_id" = i64, Path, description = "Driver ID")),
    responses((status = 200, description = "Reports filed by the driver", body = ApiResponse<Vec<EmergencyReportDto>>))
)]
pub async fn by_driver(
    State(state): State<EmergencyHandlerState>,
    Path(driver_id): Path<i64>,
) -> ApiResult<Vec<EmergencyReportDto>> {
    ok(to_dtos(state.emergencies.by_driver(driver_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/emergency-reports/driver/{driver_id}/recent",
    tag = "Emergencies",
    params(("driver_id" = i64, Path, description = "Driver ID"), RecentDaysParams),
    responses(
        (status = 200, description = "Reports of the last N days", body = ApiResponse<Vec<EmergencyReportDto>>),
        (status = 400, description = "Non-positive day count")
    )
)]
pub async fn recent_by_driver(
    State(state): State<EmergencyHandlerState>,
    Path(driver_id): Path<i64>,
    Query(params): Query<RecentDaysParams>,
) -> ApiResult<Vec<EmergencyReportDto>> {
    ok(to_dtos(
        state
            .emergencies
            .recent_by_driver(driver_id, params.days)
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/emergency-reports/{id}/status",
    tag = "Emergencies",
    params(("id" = i64, Path, description = "Report ID")),
    request_body = EmergencyStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<EmergencyReportDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_status(
    State(state): State<EmergencyHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<EmergencyStatusRequest>,
) -> ApiResult<EmergencyReportDto> {
    let status = non_blank(request.status.as_deref())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;
    ok(state.emergencies.update_status(id, status).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/emergency-reports/{id}",
    tag = "Emergencies",
    params(("id" = i64, Path, description = "Report ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_report(
    State(state): State<EmergencyHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.emergencies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/emergency-reports/high-priority",
    tag = "Emergencies",
    responses((status = 200, description = "HIGH and CRITICAL reports, newest first", body = ApiResponse<Vec<EmergencyReportDto>>))
)]
pub async fn high_priority(State(state): State<EmergencyHandlerState>) -> ApiResult<Vec<EmergencyReportDto>> {
    ok(to_dtos(state.emergencies.high_priority().await?))
}

//! Equipment handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::equipment::EquipmentService;
use crate::domain::equipment::Equipment;
use crate::interfaces::http::common::{created, ok, parse_date, ApiError, ApiResponse, ApiResult};
use crate::interfaces::http::modules::tasks::TaskDto;

#[derive(Clone)]
pub struct EquipmentHandlerState {
    pub equipment: Arc<EquipmentService>,
}

fn to_dtos(items: Vec<Equipment>) -> Vec<EquipmentDto> {
    items.into_iter().map(EquipmentDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/equipments",
    tag = "Equipment",
    responses((status = 200, description = "All equipment", body = ApiResponse<Vec<EquipmentDto>>))
)]
pub async fn list_equipment(State(state): State<EquipmentHandlerState>) -> ApiResult<Vec<EquipmentDto>> {
    ok(to_dtos(state.equipment.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/equipments/{id}",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment", body = ApiResponse<EquipmentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_equipment(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<EquipmentDto> {
    ok(state.equipment.get(id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/equipments",
    tag = "Equipment",
    request_body = EquipmentRequest,
    responses(
        (status = 201, description = "Equipment registered", body = ApiResponse<EquipmentDto>),
        (status = 400, description = "Missing name, bad status or date"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_equipment(
    State(state): State<EquipmentHandlerState>,
    Json(request): Json<EquipmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EquipmentDto>>), ApiError> {
    created(state.equipment.create(request.into_input()?).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/equipments/{id}",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    request_body = EquipmentRequest,
    responses(
        (status = 200, description = "Equipment updated", body = ApiResponse<EquipmentDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn update_equipment(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<EquipmentRequest>,
) -> ApiResult<EquipmentDto> {
    ok(state.equipment.update(id, request.into_input()?).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/equipments/{id}",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_equipment(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/equipments/{id}/status",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    request_body = EquipmentStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<EquipmentDto>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_status(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<EquipmentStatusRequest>,
) -> ApiResult<EquipmentDto> {
    let status = request
        .status
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;
    ok(state.equipment.update_status(id, &status).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/equipments/{id}/maintenance-history",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID"), HistoryParams),
    responses(
        (status = 200, description = "Service records, oldest first", body = ApiResponse<Vec<MaintenanceRecordDto>>),
        (status = 400, description = "Bad date or window"),
        (status = 404, description = "Not found")
    )
)]
pub async fn maintenance_history(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Vec<MaintenanceRecordDto>> {
    let from = parse_date(params.from.as_deref(), "from")?;
    let to = parse_date(params.to.as_deref(), "to")?;
    let records = state.equipment.maintenance_history(id, from, to).await?;
    ok(records.into_iter().map(MaintenanceRecordDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/equipments/{id}/maintenance",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    request_body = MaintenanceRequest,
    responses(
        (status = 201, description = "Service recorded; equipment is operational again", body = ApiResponse<MaintenanceRecordDto>),
        (status = 400, description = "Missing description, bad dates or priority"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Equipment is retired")
    )
)]
pub async fn perform_maintenance(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<MaintenanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceRecordDto>>), ApiError> {
    let (_, record) = state
        .equipment
        .perform_maintenance(id, request.into_input()?)
        .await?;
    created(record.into())
}

#[utoipa::path(
    get,
    path = "/api/equipments/{id}/reliability",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Reliability score", body = ApiResponse<ReliabilityDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn reliability(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<ReliabilityDto> {
    ok(ReliabilityDto {
        equipment_id: id,
        reliability: state.equipment.reliability(id).await?,
    })
}

#[utoipa::path(
    get,
    path = "/api/equipments/{id}/tasks",
    tag = "Equipment",
    params(("id" = i64, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Maintenance tasks linked to the item", body = ApiResponse<Vec<TaskDto>>),
        (status = 404, description = "Not found")
    )
)]
pub async fn equipment_tasks(
    State(state): State<EquipmentHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<TaskDto>> {
    ok(state.equipment.tasks(id).await?.into_iter().map(TaskDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/equipments/search",
    tag = "Equipment",
    params(EquipmentSearchParams),
    responses(
        (status = 200, description = "Matching equipment", body = ApiResponse<Vec<EquipmentDto>>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn search(
    State(state): State<EquipmentHandlerState>,
    Query(params): Query<EquipmentSearchParams>,
) -> ApiResult<Vec<EquipmentDto>> {
    ok(to_dtos(state.equipment.search(params.into_query()?).await?))
}

#[utoipa::path(
    get,
    path = "/api/equipments/by-status/{status}",
    tag = "Equipment",
    params(("status" = String, Path, description = "OPERATIONAL, UNDER_MAINTENANCE, DEFECTIVE or RETIRED")),
    responses(
        (status = 200, description = "Equipment in the status", body = ApiResponse<Vec<EquipmentDto>>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn by_status(
    State(state): State<EquipmentHandlerState>,
    Path(status): Path<String>,
) -> ApiResult<Vec<EquipmentDto>> {
    ok(to_dtos(state.equipment.by_status(&status).await?))
}

#[utoipa::path(
    get,
    path = "/api/equipments/need-maintenance/{days}",
    tag = "Equipment",
    params(("days" = i64, Path, description = "Days since the last service")),
    responses(
        (status = 200, description = "Equipment due for service", body = ApiResponse<Vec<EquipmentDto>>),
        (status = 400, description = "Negative or out-of-range threshold")
    )
)]
pub async fn need_maintenance(
    State(state): State<EquipmentHandlerState>,
    Path(days): Path<i64>,
) -> ApiResult<Vec<EquipmentDto>> {
    ok(to_dtos(state.equipment.need_maintenance(days).await?))
}

#[utoipa::path(
    get,
    path = "/api/equipments/stats/by-status",
    tag = "Equipment",
    responses((status = 200, description = "Count per status", body = ApiResponse<BTreeMap<String, u64>>))
)]
pub async fn stats_by_status(
    State(state): State<EquipmentHandlerState>,
) -> ApiResult<BTreeMap<String, u64>> {
    ok(state.equipment.stats_by_status().await?)
}

#[utoipa::path(
    get,
    path = "/api/equipments/stats/by-location",
    tag = "Equipment",
    responses((status = 200, description = "Count per location", body = ApiResponse<BTreeMap<String, u64>>))
)]
pub async fn stats_by_location(
    State(state): State<EquipmentHandlerState>,
) -> ApiResult<BTreeMap<String, u64>> {
    ok(state.equipment.stats_by_location().await?)
}

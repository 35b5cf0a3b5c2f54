//! Vehicle handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::fleet::VehicleService;
use crate::domain::vehicle::Vehicle;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};
use crate::shared::non_blank;

#[derive(Clone)]
pub struct VehicleHandlerState {
    pub vehicles: Arc<VehicleService>,
}

fn to_dtos(vehicles: Vec<Vehicle>) -> Vec<VehicleDto> {
    vehicles.into_iter().map(VehicleDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/vehicles",
    tag = "Vehicles",
    responses((status = 200, description = "All vehicles", body = ApiResponse<Vec<VehicleDto>>))
)]
pub async fn list_vehicles(State(state): State<VehicleHandlerState>) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(state.vehicles.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.get(id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/vehicles",
    tag = "Vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Vehicle number or plate already registered")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleHandlerState>,
    Json(request): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError> {
    created(state.vehicles.create(request.into()).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle number or plate already registered")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<VehicleRequest>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.update(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_vehicle(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.vehicles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/vehicles/status/{status}",
    tag = "Vehicles",
    params(("status" = String, Path, description = "Vehicle status")),
    responses(
        (status = 200, description = "Vehicles in the status", body = ApiResponse<Vec<VehicleDto>>),
        (status = 400, description = "Invalid status")
    )
)]
pub async fn by_status(
    State(state): State<VehicleHandlerState>,
    Path(status): Path<String>,
) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(state.vehicles.by_status(&status).await?))
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/status",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = VehicleStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_status(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<VehicleStatusRequest>,
) -> ApiResult<VehicleDto> {
    let status = non_blank(request.status.as_deref())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;
    ok(state.vehicles.update_status(id, status).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/active",
    tag = "Vehicles",
    responses((status = 200, description = "Active vehicles", body = ApiResponse<Vec<VehicleDto>>))
)]
pub async fn active(State(state): State<VehicleHandlerState>) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(state.vehicles.active().await?))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/available",
    tag = "Vehicles",
    responses((status = 200, description = "Active vehicles with free seats", body = ApiResponse<Vec<VehicleDto>>))
)]
pub async fn available(State(state): State<VehicleHandlerState>) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(state.vehicles.available().await?))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/route/{route_id}",
    tag = "Vehicles",
    params(("route_id" = i64, Path, description = "Route ID")),
    responses((status = 200, description = "Vehicles on the route", body = ApiResponse<Vec<VehicleDto>>))
)]
pub async fn by_route(
    State(state): State<VehicleHandlerState>,
    Path(route_id): Path<i64>,
) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(state.vehicles.by_route(route_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{vehicle_id}/assign-route/{route_id}",
    tag = "Vehicles",
    params(
        ("vehicle_id" = i64, Path, description = "Vehicle ID"),
        ("route_id" = i64, Path, description = "Route ID")
    ),
    responses(
        (status = 200, description = "Route assigned", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Vehicle or route not found")
    )
)]
pub async fn assign_route(
    State(state): State<VehicleHandlerState>,
    Path((vehicle_id, route_id)): Path<(i64, i64)>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.assign_route(vehicle_id, route_id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{vehicle_id}/unassign-route",
    tag = "Vehicles",
    params(("vehicle_id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Route removed", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn unassign_route(
    State(state): State<VehicleHandlerState>,
    Path(vehicle_id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.unassign_route(vehicle_id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/maintenance/due",
    tag = "Vehicles",
    responses((status = 200, description = "Vehicles due for maintenance within 7 days", body = ApiResponse<Vec<VehicleDto>>))
)]
pub async fn maintenance_due(State(state): State<VehicleHandlerState>) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(state.vehicles.maintenance_due().await?))
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/maintenance/complete",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Maintenance recorded", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn complete_maintenance(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.complete_maintenance(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/breakdown/report",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Breakdown recorded", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn report_breakdown(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.report_breakdown(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/breakdown/resolve",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle back in service", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn resolve_breakdown(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.resolve_breakdown(id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/vehicles/{id}/location",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = LocationFixRequest,
    responses(
        (status = 201, description = "Fix recorded", body = ApiResponse<VehicleLocationDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn record_location(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<LocationFixRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleLocationDto>>), ApiError> {
    created(state.vehicles.record_location(id, request.into()).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}/location",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses((status = 200, description = "Latest fix or a message", body = ApiResponse<LatestLocationResponse>))
)]
pub async fn latest_location(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<LatestLocationResponse> {
    ok(state.vehicles.latest_location(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}/location/history",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses((status = 200, description = "Fixes, newest first", body = ApiResponse<Vec<VehicleLocationDto>>))
)]
pub async fn location_history(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<VehicleLocationDto>> {
    let history = state.vehicles.location_history(id).await?;
    ok(history.into_iter().map(VehicleLocationDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/statistics/fleet",
    tag = "Vehicles",
    responses((status = 200, description = "Fleet statistics", body = ApiResponse<FleetStatisticsDto>))
)]
pub async fn fleet_statistics(State(state): State<VehicleHandlerState>) -> ApiResult<FleetStatisticsDto> {
    ok(state.vehicles.statistics().await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/trip/start",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle in transit", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle is not ACTIVE or is deactivated")
    )
)]
pub async fn start_trip(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.start_trip(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/trip/end",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Trip finished, vehicle ACTIVE", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle is not IN_TRANSIT")
    )
)]
pub async fn end_trip(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.end_trip(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/service/start",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle ACTIVE", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle deactivated, unavailable or overdue for maintenance")
    )
)]
pub async fn start_service(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.start_service(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/service/end",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle INACTIVE", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle is in transit or unavailable")
    )
)]
pub async fn end_service(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.end_service(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/activate",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle enabled", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn activate(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.activate(id).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/deactivate",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle disabled and INACTIVE", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Vehicle is in transit")
    )
)]
pub async fn deactivate(
    State(state): State<VehicleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.deactivate(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/by-number/{vehicle_number}",
    tag = "Vehicles",
    params(("vehicle_number" = String, Path, description = "Fleet number")),
    responses(
        (status = 200, description = "Vehicle", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn by_number(
    State(state): State<VehicleHandlerState>,
    Path(vehicle_number): Path<String>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.by_number(&vehicle_number).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/by-plate/{license_plate}",
    tag = "Vehicles",
    params(("license_plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "Vehicle", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn by_plate(
    State(state): State<VehicleHandlerState>,
    Path(license_plate): Path<String>,
) -> ApiResult<VehicleDto> {
    ok(state.vehicles.by_plate(&license_plate).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/vehicles/in-radius",
    tag = "Vehicles",
    params(RadiusParams),
    responses(
        (status = 200, description = "Vehicles seen recently inside the circle, nearest first", body = ApiResponse<Vec<VehicleDto>>),
        (status = 400, description = "Bad coordinates, radius or time window")
    )
)]
pub async fn in_radius(
    State(state): State<VehicleHandlerState>,
    Query(params): Query<RadiusParams>,
) -> ApiResult<Vec<VehicleDto>> {
    ok(to_dtos(
        state
            .vehicles
            .in_radius(params.latitude, params.longitude, params.radius_km, params.minutes_back)
            .await?,
    ))
}

//! Bus handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::fleet::BusService;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct BusHandlerState {
    pub buses: Arc<BusService>,
}

#[utoipa::path(
    get,
    path = "/api/buses",
    tag = "Buses",
    responses((status = 200, description = "All buses", body = ApiResponse<Vec<BusDto>>))
)]
pub async fn list_buses(State(state): State<BusHandlerState>) -> ApiResult<Vec<BusDto>> {
    ok(state.buses.list().await?.into_iter().map(BusDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/buses/{id}",
    tag = "Buses",
    params(("id" = i64, Path, description = "Bus ID")),
    responses(
        (status = 200, description = "Bus", body = ApiResponse<BusDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_bus(State(state): State<BusHandlerState>, Path(id): Path<i64>) -> ApiResult<BusDto> {
    ok(state.buses.get(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/buses/driver/{driver_id}",
    tag = "Buses",
    params(("driver_id" = i64, Path, description = "Driver ID")),
    responses((status = 200, description = "Buses driven by the driver", body = ApiResponse<Vec<BusDto>>))
)]
pub async fn by_driver(
    State(state): State<BusHandlerState>,
    Path(driver_id): Path<i64>,
) -> ApiResult<Vec<BusDto>> {
    ok(state.buses.by_driver(driver_id).await?.into_iter().map(BusDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/buses",
    tag = "Buses",
    request_body = BusRequest,
    responses(
        (status = 201, description = "Bus created", body = ApiResponse<BusDto>),
        (status = 400, description = "Invalid bus, driver or route")
    )
)]
pub async fn create_bus(
    State(state): State<BusHandlerState>,
    Json(request): Json<BusRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BusDto>>), ApiError> {
    created(state.buses.create(request.into()).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/buses/{id}",
    tag = "Buses",
    params(("id" = i64, Path, description = "Bus ID")),
    request_body = BusRequest,
    responses(
        (status = 200, description = "Bus updated", body = ApiResponse<BusDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_bus(
    State(state): State<BusHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<BusRequest>,
) -> ApiResult<BusDto> {
    ok(state.buses.update(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/buses/{id}",
    tag = "Buses",
    params(("id" = i64, Path, description = "Bus ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_bus(
    State(state): State<BusHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.buses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/buses/{id}/location",
    tag = "Buses",
    params(("id" = i64, Path, description = "Bus ID")),
    request_body = LocationRequest,
    responses(
        (status = 200, description = "Position stored and broadcast", body = ApiResponse<BusDto>),
        (status = 400, description = "Coordinates out of range"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_location(
    State(state): State<BusHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<LocationRequest>,
) -> ApiResult<BusDto> {
    let bus = state
        .buses
        .update_location(id, request.lat, request.lng, request.progress)
        .await?;
    ok(bus.into())
}

#[utoipa::path(
    patch,
    path = "/api/buses/{id}/accident",
    tag = "Buses",
    params(("id" = i64, Path, description = "Bus ID")),
    request_body = AccidentRequest,
    responses(
        (status = 200, description = "Accident flag updated", body = ApiResponse<BusDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_accident(
    State(state): State<BusHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<AccidentRequest>,
) -> ApiResult<BusDto> {
    ok(state.buses.set_accident(id, request.has_accident).await?.into())
}

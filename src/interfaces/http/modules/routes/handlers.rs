//! Route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::scheduling::RouteService;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct RouteHandlerState {
    pub routes: Arc<RouteService>,
}

#[utoipa::path(
    get,
    path = "/api/routes",
    tag = "Routes",
    responses((status = 200, description = "All routes", body = ApiResponse<Vec<RouteDto>>))
)]
pub async fn list_routes(State(state): State<RouteHandlerState>) -> ApiResult<Vec<RouteDto>> {
    ok(state.routes.list().await?.into_iter().map(RouteDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/routes/{id}",
    tag = "Routes",
    params(("id" = i64, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route", body = ApiResponse<RouteDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_route(State(state): State<RouteHandlerState>, Path(id): Path<i64>) -> ApiResult<RouteDto> {
    ok(state.routes.get(id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/routes",
    tag = "Routes",
    request_body = RouteRequest,
    responses(
        (status = 201, description = "Route created", body = ApiResponse<RouteDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Route code already used")
    )
)]
pub async fn create_route(
    State(state): State<RouteHandlerState>,
    Json(request): Json<RouteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RouteDto>>), ApiError> {
    created(state.routes.create(request.into()).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/routes/{id}",
    tag = "Routes",
    params(("id" = i64, Path, description = "Route ID")),
    request_body = RouteRequest,
    responses(
        (status = 200, description = "Route updated", body = ApiResponse<RouteDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Route code already used")
    )
)]
pub async fn update_route(
    State(state): State<RouteHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<RouteRequest>,
) -> ApiResult<RouteDto> {
    ok(state.routes.update(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/routes/{id}",
    tag = "Routes",
    params(("id" = i64, Path, description = "Route ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_route(
    State(state): State<RouteHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.routes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/routes/{id}/stops",
    tag = "Routes",
    params(("id" = i64, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Stops in sequence order", body = ApiResponse<Vec<StopDto>>),
        (status = 404, description = "Route not found")
    )
)]
pub async fn list_stops(
    State(state): State<RouteHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<StopDto>> {
    ok(state.routes.stops(id).await?.into_iter().map(StopDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/routes/{id}/stops",
    tag = "Routes",
    params(("id" = i64, Path, description = "Route ID")),
    request_body = StopRequest,
    responses(
        (status = 201, description = "Stop added", body = ApiResponse<StopDto>),
        (status = 400, description = "Missing name or coordinates"),
        (status = 404, description = "Route not found")
    )
)]
pub async fn add_stop(
    State(state): State<RouteHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<StopRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StopDto>>), ApiError> {
    created(state.routes.add_stop(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/routes/{id}/stops/{stop_id}",
    tag = "Routes",
    params(
        ("id" = i64, Path, description = "Route ID"),
        ("stop_id" = i64, Path, description = "Stop ID")
    ),
    responses((status = 204, description = "Stop removed"), (status = 404, description = "Stop not on this route"))
)]
pub async fn remove_stop(
    State(state): State<RouteHandlerState>,
    Path((id, stop_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.routes.remove_stop(id, stop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

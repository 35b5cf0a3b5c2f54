//! Traffic handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::traffic::TrafficService;
use crate::domain::traffic::{TrafficData, TrafficQuery};
use crate::interfaces::http::common::{
    created, ok, parse_time, ApiError, ApiResponse, ApiResult, PaginatedResponse,
};

#[derive(Clone)]
pub struct TrafficHandlerState {
    pub traffic: Arc<TrafficService>,
}

fn to_dtos(rows: Vec<TrafficData>) -> Vec<TrafficDataDto> {
    rows.into_iter().map(TrafficDataDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/traffic-data",
    tag = "Traffic",
    request_body = TrafficRequest,
    responses(
        (status = 201, description = "Observation recorded", body = ApiResponse<TrafficDataDto>),
        (status = 400, description = "Missing coordinates or level outside 1..=5")
    )
)]
pub async fn record_traffic(
    State(state): State<TrafficHandlerState>,
    Json(request): Json<TrafficRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TrafficDataDto>>), ApiError> {
    created(state.traffic.record(request.into()).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/traffic-data/batch",
    tag = "Traffic",
    request_body = Vec<TrafficRequest>,
    responses(
        (status = 201, description = "Observations recorded", body = ApiResponse<Vec<TrafficDataDto>>),
        (status = 400, description = "An observation is invalid; nothing was stored")
    )
)]
pub async fn record_batch(
    State(state): State<TrafficHandlerState>,
    Json(requests): Json<Vec<TrafficRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TrafficDataDto>>>), ApiError> {
    let inputs = requests.into_iter().map(Into::into).collect();
    created(to_dtos(state.traffic.record_batch(inputs).await?))
}

#[utoipa::path(
    get,
    path = "/api/traffic-data",
    tag = "Traffic",
    params(PageParams),
    responses((status = 200, description = "Observations, newest first", body = ApiResponse<PaginatedResponse<TrafficDataDto>>))
)]
pub async fn list_traffic(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<PageParams>,
) -> ApiResult<PaginatedResponse<TrafficDataDto>> {
    let page = state.traffic.page(params.page, params.size).await?;
    ok(PaginatedResponse::new(
        to_dtos(page.items),
        page.total,
        page.page as u32,
        page.limit as u32,
    ))
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/{id}",
    tag = "Traffic",
    params(("id" = i64, Path, description = "Observation ID")),
    responses(
        (status = 200, description = "Observation", body = ApiResponse<TrafficDataDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_traffic(State(state): State<TrafficHandlerState>, Path(id): Path<i64>) -> ApiResult<TrafficDataDto> {
    ok(state.traffic.get(id).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/traffic-data/{id}",
    tag = "Traffic",
    params(("id" = i64, Path, description = "Observation ID")),
    request_body = TrafficRequest,
    responses(
        (status = 200, description = "Observation updated", body = ApiResponse<TrafficDataDto>),
        (status = 400, description = "Invalid level"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_traffic(
    State(state): State<TrafficHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<TrafficRequest>,
) -> ApiResult<TrafficDataDto> {
    ok(state.traffic.update(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/traffic-data/{id}",
    tag = "Traffic",
    params(("id" = i64, Path, description = "Observation ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_traffic(State(state): State<TrafficHandlerState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    state.traffic.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/nearby",
    tag = "Traffic",
    params(AreaParams),
    responses(
        (status = 200, description = "Newest observations inside the box", body = ApiResponse<Vec<TrafficDataDto>>),
        (status = 400, description = "Invalid coordinates or radius")
    )
)]
pub async fn nearby(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<AreaParams>,
) -> ApiResult<Vec<TrafficDataDto>> {
    ok(to_dtos(state.traffic.nearby(params.lat, params.lng, params.radius).await?))
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/current-level",
    tag = "Traffic",
    params(AreaParams),
    responses(
        (status = 200, description = "Current congestion level around the point", body = ApiResponse<CurrentLevelDto>),
        (status = 400, description = "Invalid coordinates or radius")
    )
)]
pub async fn current_level(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<AreaParams>,
) -> ApiResult<CurrentLevelDto> {
    ok(state
        .traffic
        .current_level(params.lat, params.lng, params.radius)
        .await?
        .into())
}

#[utoipa::path(
    post,
    path = "/api/traffic-data/search",
    tag = "Traffic",
    request_body = TrafficSearchRequest,
    responses(
        (status = 200, description = "Matching observations", body = ApiResponse<Vec<TrafficDataDto>>),
        (status = 400, description = "Invalid criteria")
    )
)]
pub async fn search(
    State(state): State<TrafficHandlerState>,
    Json(request): Json<TrafficSearchRequest>,
) -> ApiResult<Vec<TrafficDataDto>> {
    let query = TrafficQuery {
        start_time: parse_time(request.start_time.as_deref(), "startTime")?,
        end_time: parse_time(request.end_time.as_deref(), "endTime")?,
        latitude: request.latitude,
        longitude: request.longitude,
        radius: request.radius,
        min_traffic_level: request.min_traffic_level,
        max_traffic_level: request.max_traffic_level,
        weather_condition: request.weather_condition,
        is_holiday: request.is_holiday,
        day_of_week: request.day_of_week,
        hour_of_day: request.hour_of_day,
        road_type: request.road_type,
        event_type: request.event_type,
        limit: request.limit,
    };
    ok(to_dtos(state.traffic.search(query).await?))
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/hotspots",
    tag = "Traffic",
    params(HotspotParams),
    responses((status = 200, description = "Congested spots, worst first", body = ApiResponse<Vec<HotspotDto>>))
)]
pub async fn hotspots(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<HotspotParams>,
) -> ApiResult<Vec<HotspotDto>> {
    let spots = state.traffic.hotspots(params.hours, params.min_level).await?;
    ok(spots.into_iter().map(HotspotDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/stats/hourly",
    tag = "Traffic",
    params(HourlyParams),
    responses((status = 200, description = "Average level and speed per hour of day", body = ApiResponse<Vec<HourlyStatDto>>))
)]
pub async fn hourly(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<HourlyParams>,
) -> ApiResult<Vec<HourlyStatDto>> {
    let stats = state.traffic.hourly(params.hours, params.area()).await?;
    ok(stats.into_iter().map(HourlyStatDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/rush-hour",
    tag = "Traffic",
    params(RushHourParams),
    responses((status = 200, description = "Weekday observations at 7-9 and 17-19", body = ApiResponse<Vec<TrafficDataDto>>))
)]
pub async fn rush_hour(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<RushHourParams>,
) -> ApiResult<Vec<TrafficDataDto>> {
    ok(to_dtos(state.traffic.rush_hour(params.hours).await?))
}

#[utoipa::path(
    get,
    path = "/api/traffic-data/summary",
    tag = "Traffic",
    params(SummaryParams),
    responses((status = 200, description = "Summary of the window", body = ApiResponse<TrafficSummaryDto>))
)]
pub async fn summary(
    State(state): State<TrafficHandlerState>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<TrafficSummaryDto> {
    let since = parse_time(params.since.as_deref(), "since")?;
    ok(state.traffic.summary(since).await?.into())
}

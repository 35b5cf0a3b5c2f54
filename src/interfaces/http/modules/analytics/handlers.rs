//! Analytics handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::*;
use crate::application::analytics::AnalyticsService;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct AnalyticsState {
    pub analytics: Arc<AnalyticsService>,
}

#[utoipa::path(
    get,
    path = "/api/analytics/system-overview",
    tag = "Analytics",
    responses((status = 200, description = "Headline counters", body = ApiResponse<SystemOverviewDto>))
)]
pub async fn system_overview(State(state): State<AnalyticsState>) -> ApiResult<SystemOverviewDto> {
    ok(state.analytics.system_overview().await?.into())
}

#[utoipa::path(
    get,
    path = "/api/analytics/passenger-statistics",
    tag = "Analytics",
    responses((status = 200, description = "Passenger counts and top customers", body = ApiResponse<PassengerStatisticsDto>))
)]
pub async fn passenger_statistics(State(state): State<AnalyticsState>) -> ApiResult<PassengerStatisticsDto> {
    ok(state.analytics.passenger_statistics().await?.into())
}

#[utoipa::path(
    get,
    path = "/api/analytics/financial-statistics/{period}",
    tag = "Analytics",
    params(("period" = String, Path, description = "day, week, month or year")),
    responses(
        (status = 200, description = "Revenue over the period", body = ApiResponse<FinancialStatisticsDto>),
        (status = 400, description = "Invalid period")
    )
)]
pub async fn financial_statistics(
    State(state): State<AnalyticsState>,
    Path(period): Path<String>,
) -> ApiResult<FinancialStatisticsDto> {
    ok(state.analytics.financial_statistics(&period).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/analytics/bus-performance/{period}",
    tag = "Analytics",
    params(("period" = String, Path, description = "day, week, month or year")),
    responses(
        (status = 200, description = "Tickets, revenue and occupancy per bus", body = ApiResponse<Vec<BusPerformanceDto>>),
        (status = 400, description = "Invalid period")
    )
)]
pub async fn bus_performance(
    State(state): State<AnalyticsState>,
    Path(period): Path<String>,
) -> ApiResult<Vec<BusPerformanceDto>> {
    let rows = state.analytics.bus_performance(&period).await?;
    ok(rows.into_iter().map(BusPerformanceDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/analytics/driver-revenue/{period}",
    tag = "Analytics",
    params(("period" = String, Path, description = "day, week, month or year")),
    responses(
        (status = 200, description = "Revenue collected per driver", body = ApiResponse<Vec<DriverRevenueDto>>),
        (status = 400, description = "Invalid period")
    )
)]
pub async fn driver_revenue(
    State(state): State<AnalyticsState>,
    Path(period): Path<String>,
) -> ApiResult<Vec<DriverRevenueDto>> {
    let rows = state.analytics.driver_revenue(&period).await?;
    ok(rows.into_iter().map(DriverRevenueDto::from).collect())
}

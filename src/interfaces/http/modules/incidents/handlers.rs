//! Incident handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};

use super::dto::*;
use crate::application::incidents::{IncidentService, StatsFilter};
use crate::domain::incident::{Incident, IncidentType};
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};
use crate::shared::{non_blank, parse_date_or_datetime, parse_datetime};

#[derive(Clone)]
pub struct IncidentHandlerState {
    pub incidents: Arc<IncidentService>,
}

fn to_dtos(incidents: Vec<Incident>) -> Vec<IncidentDto> {
    incidents.into_iter().map(IncidentDto::from).collect()
}

fn parse_bound(value: Option<&str>, field: &str, end_of_day: bool) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    if let Some(dt) = parse_datetime(value) {
        return Ok(Some(dt));
    }
    if end_of_day {
        if let Some(end) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(23, 59, 59))
        {
            return Ok(Some(end.and_utc()));
        }
    }
    parse_date_or_datetime(value)
        .map(Some)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid {}: {}", field, value)))
}

#[utoipa::path(
    post,
    path = "/api/incidents",
    tag = "Incidents",
    request_body = IncidentRequest,
    responses(
        (status = 201, description = "Incident reported", body = ApiResponse<IncidentDto>),
        (status = 400, description = "Invalid type, severity or status")
    )
)]
pub async fn report_incident(
    State(state): State<IncidentHandlerState>,
    Json(request): Json<IncidentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IncidentDto>>), ApiError> {
    created(state.incidents.report(request.into()).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/incidents",
    tag = "Incidents",
    responses((status = 200, description = "All incidents", body = ApiResponse<Vec<IncidentDto>>))
)]
pub async fn list_incidents(State(state): State<IncidentHandlerState>) -> ApiResult<Vec<IncidentDto>> {
    ok(to_dtos(state.incidents.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Incident", body = ApiResponse<IncidentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_incident(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<IncidentDto> {
    ok(state.incidents.get(&id).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    request_body = IncidentRequest,
    responses(
        (status = 200, description = "Incident updated", body = ApiResponse<IncidentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_incident(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<IncidentRequest>,
) -> ApiResult<IncidentDto> {
    ok(state.incidents.update(&id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_incident(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.incidents.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/incidents/by-bus/{bus_id}",
    tag = "Incidents",
    params(("bus_id" = i64, Path, description = "Bus ID")),
    responses(
        (status = 200, description = "Latest incident of the bus", body = ApiResponse<IncidentDto>),
        (status = 404, description = "No incident for this bus")
    )
)]
pub async fn latest_for_bus(
    State(state): State<IncidentHandlerState>,
    Path(bus_id): Path<i64>,
) -> ApiResult<IncidentDto> {
    ok(state.incidents.latest_for_bus(bus_id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/incidents/recent",
    tag = "Incidents",
    params(RecentParams),
    responses((status = 200, description = "Newest incidents", body = ApiResponse<Vec<IncidentDto>>))
)]
pub async fn recent_incidents(
    State(state): State<IncidentHandlerState>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Vec<IncidentDto>> {
    ok(to_dtos(state.incidents.recent(params.limit).await?))
}

#[utoipa::path(
    get,
    path = "/api/incidents/technician/{id}/history",
    tag = "Incidents",
    params(("id" = i64, Path, description = "Technician ID")),
    responses((status = 200, description = "Incidents handled by the technician", body = ApiResponse<Vec<IncidentDto>>))
)]
pub async fn technician_history(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<IncidentDto>> {
    ok(to_dtos(state.incidents.technician_history(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/incidents/{id}/assign",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Incident assigned", body = ApiResponse<IncidentDto>),
        (status = 400, description = "Neither team nor technicians given"),
        (status = 404, description = "Not found")
    )
)]
pub async fn assign(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<AssignRequest>,
) -> ApiResult<IncidentDto> {
    ok(state.incidents.assign(&id, request.into()).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/incidents/{id}/assign-technician",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    request_body = AssignTechnicianRequest,
    responses(
        (status = 200, description = "Technician assigned and emailed", body = ApiResponse<IncidentDto>),
        (status = 400, description = "Missing fields or staff member is not a technician"),
        (status = 404, description = "Incident or technician not found")
    )
)]
pub async fn assign_technician(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<AssignTechnicianRequest>,
) -> ApiResult<IncidentDto> {
    let technician_id = request
        .technician_id
        .ok_or_else(|| ApiError::bad_request("Technician ID is required"))?;
    let incident = state
        .incidents
        .assign_technician(&id, request.into_assignment(technician_id))
        .await?;
    ok(incident.into())
}

#[utoipa::path(
    get,
    path = "/api/incidents/{id}/tasks",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    responses((status = 200, description = "Technician tasks created for the incident", body = ApiResponse<Vec<IncidentTaskDto>>))
)]
pub async fn incident_tasks(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<IncidentTaskDto>> {
    let tasks = state.incidents.tasks(&id).await?;
    ok(tasks.into_iter().map(IncidentTaskDto::from).collect())
}

#[utoipa::path(
    patch,
    path = "/api/incidents/{id}/status",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<IncidentDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_status(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<IncidentDto> {
    let status = non_blank(request.status.as_deref())
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;
    ok(state.incidents.update_status(&id, status).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/incidents/{id}/details",
    tag = "Incidents",
    params(("id" = String, Path, description = "Incident ID")),
    request_body = BTreeMap<String, String>,
    responses(
        (status = 200, description = "Details merged", body = ApiResponse<IncidentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn merge_details(
    State(state): State<IncidentHandlerState>,
    Path(id): Path<String>,
    Json(details): Json<BTreeMap<String, String>>,
) -> ApiResult<IncidentDto> {
    ok(state.incidents.merge_details(&id, details).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/incidents/frequency",
    tag = "Incidents",
    responses((status = 200, description = "Incident count per type", body = ApiResponse<BTreeMap<String, u64>>))
)]
pub async fn frequency(State(state): State<IncidentHandlerState>) -> ApiResult<BTreeMap<String, u64>> {
    ok(state.incidents.frequency().await?)
}

#[utoipa::path(
    get,
    path = "/api/incidents/severity",
    tag = "Incidents",
    responses((status = 200, description = "Incident count per severity", body = ApiResponse<BTreeMap<String, u64>>))
)]
pub async fn severity_distribution(
    State(state): State<IncidentHandlerState>,
) -> ApiResult<BTreeMap<String, u64>> {
    ok(state.incidents.severity_distribution().await?)
}

#[utoipa::path(
    get,
    path = "/api/incidents/trends",
    tag = "Incidents",
    responses((status = 200, description = "Incident count per day", body = ApiResponse<BTreeMap<String, u64>>))
)]
pub async fn trends(State(state): State<IncidentHandlerState>) -> ApiResult<BTreeMap<String, u64>> {
    ok(state.incidents.trends().await?)
}

#[utoipa::path(
    get,
    path = "/api/incidents/reports",
    tag = "Incidents",
    responses((status = 200, description = "Totals by type and severity", body = ApiResponse<IncidentReportDto>))
)]
pub async fn reports(State(state): State<IncidentHandlerState>) -> ApiResult<IncidentReportDto> {
    ok(state.incidents.report_summary().await?.into())
}

#[utoipa::path(
    get,
    path = "/api/incidents/stats",
    tag = "Incidents",
    params(StatsParams),
    responses(
        (status = 200, description = "Safety statistics for the window", body = ApiResponse<IncidentStatsDto>),
        (status = 400, description = "Unparsable or inverted dates")
    )
)]
pub async fn stats(
    State(state): State<IncidentHandlerState>,
    Query(params): Query<StatsParams>,
) -> ApiResult<IncidentStatsDto> {
    let filter = StatsFilter {
        start: parse_bound(params.start_date.as_deref(), "startDate", false)?,
        end: parse_bound(params.end_date.as_deref(), "endDate", true)?,
        incident_type: params
            .incident_type
            .as_deref()
            .and_then(IncidentType::from_str),
    };
    ok(state.incidents.stats(filter).await?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn date_only_end_bound_covers_the_whole_day() {
        let end = parse_bound(Some("2025-03-01"), "endDate", true).unwrap().unwrap();
        assert_eq!((end.day(), end.hour(), end.minute(), end.second()), (1, 23, 59, 59));
        let start = parse_bound(Some("2025-03-01"), "startDate", false).unwrap().unwrap();
        assert_eq!(start.hour(), 0);
        assert!(parse_bound(Some("yesterday"), "startDate", false).is_err());
        assert!(parse_bound(None, "startDate", false).unwrap().is_none());
    }
}

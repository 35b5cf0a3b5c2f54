//! Incident DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::incidents::{
    Assignment, IncidentReport, IncidentStats, IncidentUpdate, NewIncident, TechnicianAssignment,
};
use crate::domain::incident::{Incident, IncidentTask};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDto {
    pub incident_id: String,
    pub incident_type: String,
    pub location: String,
    pub severity: String,
    pub date_time: DateTime<Utc>,
    pub status: String,
    pub summary: Option<String>,
    pub bus_id: Option<i64>,
    pub assigned_technician_id: Option<i64>,
    pub assigned_technician_name: Option<String>,
    pub assigned_team_id: Option<i64>,
    pub resolution_time: Option<DateTime<Utc>>,
    pub additional_details: BTreeMap<String, String>,
}

impl From<Incident> for IncidentDto {
    fn from(i: Incident) -> Self {
        Self {
            incident_id: i.incident_id,
            incident_type: i.incident_type.to_string(),
            location: i.location,
            severity: i.severity.to_string(),
            date_time: i.date_time,
            status: i.status.to_string(),
            summary: i.summary,
            bus_id: i.bus_id,
            assigned_technician_id: i.assigned_technician_id,
            assigned_technician_name: i.assigned_technician_name,
            assigned_team_id: i.assigned_team_id,
            resolution_time: i.resolution_time,
            additional_details: i.additional_details,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentTaskDto {
    pub id: i64,
    pub incident_id: String,
    pub technician_id: i64,
    pub description: String,
    pub priority: String,
    pub deadline: Option<DateTime<Utc>>,
    pub progress: i32,
    pub status: String,
    pub progress_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<IncidentTask> for IncidentTaskDto {
    fn from(t: IncidentTask) -> Self {
        Self {
            id: t.id,
            incident_id: t.incident_id,
            technician_id: t.technician_id,
            description: t.description,
            priority: t.priority.to_string(),
            deadline: t.deadline,
            progress: t.progress,
            status: t.status.to_string(),
            progress_notes: t.progress_notes,
            created_at: t.created_at,
        }
    }
}

/// Report and update body; on update only present fields change
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRequest {
    pub incident_type: Option<String>,
    pub location: Option<String>,
    pub severity: Option<String>,
    pub date_time: Option<String>,
    pub summary: Option<String>,
    pub bus_id: Option<i64>,
    pub status: Option<String>,
    pub additional_details: Option<BTreeMap<String, String>>,
}

impl From<IncidentRequest> for NewIncident {
    fn from(r: IncidentRequest) -> Self {
        NewIncident {
            incident_type: r.incident_type,
            location: r.location,
            severity: r.severity,
            date_time: r.date_time,
            summary: r.summary,
            bus_id: r.bus_id,
            status: r.status,
            additional_details: r.additional_details,
        }
    }
}

impl From<IncidentRequest> for IncidentUpdate {
    fn from(r: IncidentRequest) -> Self {
        IncidentUpdate {
            incident_type: r.incident_type,
            location: r.location,
            severity: r.severity,
            date_time: r.date_time,
            summary: r.summary,
            bus_id: r.bus_id,
            status: r.status,
            additional_details: r.additional_details,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub team_id: Option<i64>,
    pub technician_ids: Option<Vec<i64>>,
    pub task_description: Option<String>,
}

impl From<AssignRequest> for Assignment {
    fn from(r: AssignRequest) -> Self {
        Assignment {
            team_id: r.team_id,
            technician_ids: r.technician_ids,
            task_description: r.task_description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignTechnicianRequest {
    pub technician_id: Option<i64>,
    #[serde(default)]
    pub task_description: String,
    pub task_priority: Option<String>,
    pub task_deadline: Option<String>,
}

impl AssignTechnicianRequest {
    pub fn into_assignment(self, technician_id: i64) -> TechnicianAssignment {
        TechnicianAssignment {
            technician_id,
            task_description: self.task_description,
            task_priority: self.task_priority,
            task_deadline: self.task_deadline,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentParams {
    #[serde(default = "default_recent_limit")]
    pub limit: u64,
}

fn default_recent_limit() -> u64 {
    10
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    /// `YYYY-MM-DD` or a timestamp
    pub start_date: Option<String>,
    /// `YYYY-MM-DD` (whole day) or a timestamp
    pub end_date: Option<String>,
    /// Incident type; `allIncidents` or an unknown value disables the filter
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentStatsDto {
    pub total_incidents: u64,
    pub major_incidents: u64,
    pub safety_score: f64,
    pub average_resolution_time: String,
    pub resolved_incidents: u64,
    pub active_incidents: u64,
}

impl From<IncidentStats> for IncidentStatsDto {
    fn from(s: IncidentStats) -> Self {
        Self {
            total_incidents: s.total_incidents,
            major_incidents: s.major_incidents,
            safety_score: s.safety_score,
            average_resolution_time: s.average_resolution_time,
            resolved_incidents: s.resolved_incidents,
            active_incidents: s.active_incidents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReportDto {
    pub total_bus_incidents: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_severity: BTreeMap<String, u64>,
}

impl From<IncidentReport> for IncidentReportDto {
    fn from(r: IncidentReport) -> Self {
        Self {
            total_bus_incidents: r.total_bus_incidents,
            by_type: r.by_type,
            by_severity: r.by_severity,
        }
    }
}

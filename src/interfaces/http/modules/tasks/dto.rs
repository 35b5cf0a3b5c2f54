//! Maintenance task DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::maintenance::{NewTask, TaskUpdate, TechnicianTaskStats};
use crate::domain::maintenance::MaintenanceTask;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub task_id: String,
    pub description: String,
    pub priority: String,
    pub estimated_duration_minutes: i32,
    pub required_skills: Vec<String>,
    pub required_parts: Vec<String>,
    pub status: String,
    pub equipment: Option<String>,
    pub equipment_id: Option<i64>,
    pub assigned_technician_id: Option<i64>,
    pub completion_percentage: i32,
    pub creation_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl From<MaintenanceTask> for TaskDto {
    fn from(t: MaintenanceTask) -> Self {
        Self {
            task_id: t.task_id,
            description: t.description,
            priority: t.priority.to_string(),
            estimated_duration_minutes: t.estimated_duration_minutes,
            required_skills: t.required_skills,
            required_parts: t.required_parts,
            status: t.status.to_string(),
            equipment: t.equipment,
            equipment_id: t.equipment_id,
            assigned_technician_id: t.assigned_technician_id,
            completion_percentage: t.completion_percentage,
            creation_date: t.creation_date,
            due_date: t.due_date,
            last_updated: t.last_updated,
            completion_date: t.completion_date,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub task_id: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub equipment: Option<String>,
    /// Registered equipment item
    pub equipment_id: Option<i64>,
    pub technician_id: Option<i64>,
    /// ISO timestamp or `YYYY-MM-DD`
    pub due_date: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub required_parts: Option<Vec<String>>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(r: CreateTaskRequest) -> Self {
        Self {
            task_id: r.task_id,
            description: r.description,
            priority: r.priority,
            estimated_duration_minutes: r.estimated_duration_minutes,
            equipment: r.equipment,
            equipment_id: r.equipment_id,
            technician_id: r.technician_id,
            due_date: r.due_date,
            required_skills: r.required_skills,
            required_parts: r.required_parts,
        }
    }
}

/// Partial update; absent fields are left alone
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub equipment: Option<String>,
    pub equipment_id: Option<i64>,
    pub due_date: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub required_parts: Option<Vec<String>>,
}

impl From<UpdateTaskRequest> for TaskUpdate {
    fn from(r: UpdateTaskRequest) -> Self {
        Self {
            description: r.description,
            priority: r.priority,
            estimated_duration_minutes: r.estimated_duration_minutes,
            equipment: r.equipment,
            equipment_id: r.equipment_id,
            due_date: r.due_date,
            required_skills: r.required_skills,
            required_parts: r.required_parts,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskStatusRequest {
    pub status: Option<String>,
}

/// `technicianId: null` unassigns
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianRequest {
    #[serde(default)]
    pub technician_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub completion_percentage: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SkillRequest {
    pub skill: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PartRequest {
    pub part: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianStatsDto {
    pub total_tasks: usize,
    pub assigned_tasks: usize,
    pub in_progress_tasks: usize,
    pub completed_tasks: usize,
    pub on_hold_tasks: usize,
}

impl From<TechnicianTaskStats> for TechnicianStatsDto {
    fn from(s: TechnicianTaskStats) -> Self {
        Self {
            total_tasks: s.total_tasks,
            assigned_tasks: s.assigned_tasks,
            in_progress_tasks: s.in_progress_tasks,
            completed_tasks: s.completed_tasks,
            on_hold_tasks: s.on_hold_tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_null_technician_unassigns() {
        let r: TechnicianRequest = serde_json::from_str(r#"{"technicianId": null}"#).unwrap();
        assert_eq!(r.technician_id, None);
        let r: TechnicianRequest = serde_json::from_str(r#"{"technicianId": 7}"#).unwrap();
        assert_eq!(r.technician_id, Some(7));
    }

    #[test]
    fn task_dto_uses_wire_names() {
        let task = MaintenanceTask::new(
            "T-9",
            "Inspect suspension",
            crate::domain::maintenance::MaintenancePriority::Medium,
            45,
        );
        let json = serde_json::to_value(TaskDto::from(task)).unwrap();
        assert_eq!(json["taskId"], "T-9");
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["status"], "PLANNED");
        assert_eq!(json["completionPercentage"], 0);
    }
}

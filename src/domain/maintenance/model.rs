//! Maintenance task domain entity

use chrono::{DateTime, Utc};

crate::wire_enum! {
    pub enum MaintenancePriority("priority") {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

crate::wire_enum! {
    pub enum MaintenanceStatus("task status") {
        Planned => "PLANNED",
        Scheduled => "SCHEDULED",
        Pending => "PENDING",
        Assigned => "ASSIGNED",
        InProgress => "IN_PROGRESS",
        OnHold => "ON_HOLD",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

/// What a technician did with an assigned task, as seen by admins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskNotice {
    Accepted,
    Rejected,
    Completed,
}

impl TaskNotice {
    /// The notice produced by moving a task from `old` to `new`, if any
    pub fn for_transition(old: MaintenanceStatus, new: MaintenanceStatus) -> Option<Self> {
        use MaintenanceStatus::*;
        match (old, new) {
            (Assigned, InProgress) => Some(Self::Accepted),
            (Assigned, Planned) => Some(Self::Rejected),
            (InProgress | OnHold, Completed) => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

/// A unit of equipment-repair work
#[derive(Debug, Clone)]
pub struct MaintenanceTask {
    /// Client-supplied identifier
    pub task_id: String,
    pub description: String,
    pub priority: MaintenancePriority,
    pub estimated_duration_minutes: i32,
    pub required_skills: Vec<String>,
    pub required_parts: Vec<String>,
    pub status: MaintenanceStatus,
    pub equipment: Option<String>,
    /// Registered equipment item the work targets
    pub equipment_id: Option<i64>,
    pub assigned_technician_id: Option<i64>,
    /// 0..=100
    pub completion_percentage: i32,
    pub creation_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
}

impl MaintenanceTask {
    pub fn new(
        task_id: impl Into<String>,
        description: impl Into<String>,
        priority: MaintenancePriority,
        estimated_duration_minutes: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            task_id: task_id.into(),
            description: description.into(),
            priority,
            estimated_duration_minutes,
            required_skills: Vec::new(),
            required_parts: Vec::new(),
            status: MaintenanceStatus::Planned,
            equipment: None,
            equipment_id: None,
            assigned_technician_id: None,
            completion_percentage: 0,
            creation_date: now,
            due_date: None,
            last_updated: now,
            completion_date: None,
        }
    }

    /// Set the status; COMPLETED also stamps the completion date and 100 %.
    pub fn set_status(&mut self, status: MaintenanceStatus, now: DateTime<Utc>) {
        if status == MaintenanceStatus::Completed {
            self.completion_date = Some(now);
            self.completion_percentage = 100;
        }
        self.status = status;
        self.last_updated = now;
    }

    pub fn assign(&mut self, technician_id: i64, now: DateTime<Utc>) {
        self.assigned_technician_id = Some(technician_id);
        self.status = MaintenanceStatus::Assigned;
        self.last_updated = now;
    }

    pub fn unassign(&mut self, now: DateTime<Utc>) {
        self.assigned_technician_id = None;
        self.status = MaintenanceStatus::Planned;
        self.last_updated = now;
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != MaintenanceStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Add a trimmed, non-empty value if not already present. Returns
    /// whether the list changed.
    pub fn add_unique(list: &mut Vec<String>, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || list.iter().any(|v| v == value) {
            return false;
        }
        list.push(value.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use MaintenanceStatus::*;

    #[test]
    fn transition_table() {
        assert_eq!(TaskNotice::for_transition(Assigned, InProgress), Some(TaskNotice::Accepted));
        assert_eq!(TaskNotice::for_transition(Assigned, Planned), Some(TaskNotice::Rejected));
        assert_eq!(TaskNotice::for_transition(InProgress, Completed), Some(TaskNotice::Completed));
        assert_eq!(TaskNotice::for_transition(OnHold, Completed), Some(TaskNotice::Completed));
        assert_eq!(TaskNotice::for_transition(Planned, Completed), None);
        assert_eq!(TaskNotice::for_transition(Assigned, Completed), None);
        assert_eq!(TaskNotice::for_transition(InProgress, OnHold), None);
    }

    #[test]
    fn completing_sets_date_and_percentage() {
        let now = Utc::now();
        let mut task = MaintenanceTask::new("T-1", "Replace brake pads", MaintenancePriority::High, 90);
        task.set_status(Completed, now);
        assert_eq!(task.completion_percentage, 100);
        assert_eq!(task.completion_date, Some(now));
    }

    #[test]
    fn overdue_ignores_completed_tasks() {
        let now = Utc::now();
        let mut task = MaintenanceTask::new("T-2", "Oil change", MaintenancePriority::Low, 30);
        assert!(!task.is_overdue(now));
        task.due_date = Some(now - Duration::days(1));
        assert!(task.is_overdue(now));
        task.set_status(Completed, now);
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn skills_are_trimmed_and_deduplicated() {
        let mut skills = vec!["welding".to_string()];
        assert!(!MaintenanceTask::add_unique(&mut skills, "  welding "));
        assert!(!MaintenanceTask::add_unique(&mut skills, "   "));
        assert!(MaintenanceTask::add_unique(&mut skills, " hydraulics "));
        assert_eq!(skills, vec!["welding", "hydraulics"]);
    }
}

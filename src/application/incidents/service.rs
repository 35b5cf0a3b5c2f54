//! Bus incident reporting, assignment and statistics

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::application::events::{
    Event, IncidentReportedEvent, IncidentStatusChangedEvent, SharedEventBus, TeamAssignedEvent,
    TechnicianAssignedEvent,
};
use crate::domain::incident::{
    Incident, IncidentStatus, IncidentTask, IncidentTaskStatus, IncidentType, Severity,
    TaskPriority,
};
use crate::domain::staff::{Staff, StaffRole};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::mail::{MailMessage, Mailer};
use crate::shared::{format_short, non_blank, parse_datetime};

/// Fields of a new incident report. Enum fields arrive as text and are
/// parsed here so every caller gets the same validation messages.
#[derive(Debug, Clone, Default)]
pub struct NewIncident {
    pub incident_type: Option<String>,
    pub location: Option<String>,
    pub severity: Option<String>,
    pub date_time: Option<String>,
    pub summary: Option<String>,
    pub bus_id: Option<i64>,
    pub status: Option<String>,
    pub additional_details: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default)]
pub struct IncidentUpdate {
    pub incident_type: Option<String>,
    pub location: Option<String>,
    pub severity: Option<String>,
    pub date_time: Option<String>,
    pub summary: Option<String>,
    pub bus_id: Option<i64>,
    pub status: Option<String>,
    pub additional_details: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default)]
pub struct Assignment {
    pub team_id: Option<i64>,
    pub technician_ids: Option<Vec<i64>>,
    pub task_description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TechnicianAssignment {
    pub technician_id: i64,
    pub task_description: String,
    pub task_priority: Option<String>,
    pub task_deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentStats {
    pub total_incidents: u64,
    pub major_incidents: u64,
    pub safety_score: f64,
    pub average_resolution_time: String,
    pub resolved_incidents: u64,
    pub active_incidents: u64,
}

#[derive(Debug, Clone)]
pub struct IncidentReport {
    pub total_bus_incidents: u64,
    pub by_type: BTreeMap<String, u64>,
    pub by_severity: BTreeMap<String, u64>,
}

/// Window and type filter for incident statistics
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub incident_type: Option<IncidentType>,
}

pub fn count_by<F>(incidents: &[Incident], key: F) -> BTreeMap<String, u64>
where
    F: Fn(&Incident) -> String,
{
    let mut counts = BTreeMap::new();
    for incident in incidents {
        *counts.entry(key(incident)).or_insert(0) += 1;
    }
    counts
}

/// `"{h}h {m}m"`
pub fn format_resolution(hours: Option<f64>) -> String {
    let Some(hours) = hours else {
        return "0h 0m".to_string();
    };
    let h = hours.floor();
    let m = ((hours - h) * 60.0).round();
    format!("{}h {}m", h as i64, m as i64)
}

pub fn compute_stats(incidents: &[Incident]) -> IncidentStats {
    let total = incidents.len() as u64;
    let major = incidents.iter().filter(|i| i.severity.is_major()).count() as u64;
    let safety_score = if total == 0 {
        100.0
    } else {
        100.0 - (major as f64 / total as f64 * 100.0)
    };

    let resolution_hours: Vec<f64> = incidents
        .iter()
        .filter_map(Incident::resolution_minutes)
        .map(|m| m as f64 / 60.0)
        .collect();
    let average = if resolution_hours.is_empty() {
        None
    } else {
        Some(resolution_hours.iter().sum::<f64>() / resolution_hours.len() as f64)
    };

    let resolved = incidents
        .iter()
        .filter(|i| matches!(i.status, IncidentStatus::Resolved | IncidentStatus::Closed))
        .count() as u64;

    IncidentStats {
        total_incidents: total,
        major_incidents: major,
        safety_score: (safety_score * 100.0).round() / 100.0,
        average_resolution_time: format_resolution(average),
        resolved_incidents: resolved,
        active_incidents: total - resolved,
    }
}

pub fn assignment_email_body(
    technician_name: &str,
    incident: &Incident,
    task_description: &str,
    priority: TaskPriority,
    deadline: Option<DateTime<Utc>>,
) -> String {
    format!(
        "Dear {name},\n\n\
         You have been assigned to handle a bus incident. Please find the details below:\n\n\
         Incident ID: {id}\n\
         Location: {location}\n\
         Date/Time: {when}\n\
         Description: {summary}\n\n\
         Task Details:\n\
         Description: {task}\n\
         Priority: {priority}\n\
         Deadline: {deadline}\n\n\
         Please review and take the necessary actions.\n\n\
         Best regards,\n\
         ImasProject Team",
        name = technician_name,
        id = incident.incident_id,
        location = incident.location,
        when = format_short(incident.date_time),
        summary = incident.summary.as_deref().unwrap_or(""),
        task = task_description,
        priority = priority,
        deadline = deadline
            .map(format_short)
            .unwrap_or_else(|| "Not specified".to_string()),
    )
}

pub struct IncidentService {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn Mailer>,
    event_bus: SharedEventBus,
}

impl IncidentService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        mailer: Arc<dyn Mailer>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            mailer,
            event_bus,
        }
    }

    pub async fn report(&self, input: NewIncident) -> DomainResult<Incident> {
        let incident_type = non_blank(input.incident_type.as_deref())
            .ok_or_else(|| DomainError::Validation("Incident type is required".into()))
            .and_then(IncidentType::parse)?;
        let location = non_blank(input.location.as_deref())
            .ok_or_else(|| DomainError::Validation("Location is required".into()))?;

        let mut incident = Incident::new(incident_type, location);
        if let Some(severity) = non_blank(input.severity.as_deref()) {
            incident.severity = Severity::parse(severity)?;
        }
        if let Some(status) = non_blank(input.status.as_deref()) {
            incident.status = IncidentStatus::parse(status)?;
        }
        incident.date_time = input
            .date_time
            .as_deref()
            .and_then(parse_datetime)
            .unwrap_or_else(Utc::now);
        incident.summary = non_blank(input.summary.as_deref()).map(str::to_string);
        incident.bus_id = input.bus_id;
        if let Some(details) = input.additional_details {
            incident.merge_details(details);
        }

        let incident = self.repos.incidents().create(incident).await?;
        metrics::counter!("transit_incidents_reported_total").increment(1);
        info!(
            incident_id = %incident.incident_id,
            kind = %incident.incident_type,
            severity = %incident.severity,
            "🚨 Incident reported"
        );

        self.event_bus
            .publish(Event::IncidentReported(IncidentReportedEvent {
                incident_id: incident.incident_id.clone(),
                incident_type: incident.incident_type.to_string(),
                severity: incident.severity.to_string(),
                location: incident.location.clone(),
                bus_id: incident.bus_id,
            }));
        Ok(incident)
    }

    pub async fn get(&self, id: &str) -> DomainResult<Incident> {
        self.repos
            .incidents()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Incident", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Incident>> {
        self.repos.incidents().find_all().await
    }

    pub async fn latest_for_bus(&self, bus_id: i64) -> DomainResult<Incident> {
        self.repos
            .incidents()
            .find_by_bus(bus_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("Incident", "busId", bus_id))
    }

    pub async fn recent(&self, limit: u64) -> DomainResult<Vec<Incident>> {
        self.repos.incidents().find_recent(limit.clamp(1, 100)).await
    }

    pub async fn technician_history(&self, technician_id: i64) -> DomainResult<Vec<Incident>> {
        self.repos.incidents().find_by_technician(technician_id).await
    }

    pub async fn update(&self, id: &str, changes: IncidentUpdate) -> DomainResult<Incident> {
        let mut incident = self.get(id).await?;
        let old_status = incident.status;

        if let Some(v) = non_blank(changes.incident_type.as_deref()) {
            incident.incident_type = IncidentType::parse(v)?;
        }
        if let Some(v) = non_blank(changes.location.as_deref()) {
            incident.location = v.to_string();
        }
        if let Some(v) = non_blank(changes.severity.as_deref()) {
            incident.severity = Severity::parse(v)?;
        }
        if let Some(v) = changes.date_time.as_deref().and_then(parse_datetime) {
            incident.date_time = v;
        }
        if let Some(v) = changes.summary {
            incident.summary = non_blank(Some(&v)).map(str::to_string);
        }
        if changes.bus_id.is_some() {
            incident.bus_id = changes.bus_id;
        }
        if let Some(v) = non_blank(changes.status.as_deref()) {
            incident.transition_to(IncidentStatus::parse(v)?, Utc::now());
        }
        if let Some(details) = changes.additional_details {
            incident.merge_details(details);
        }

        let incident = self.repos.incidents().update(incident).await?;
        if incident.status != old_status {
            self.publish_status_change(&incident, old_status);
        }
        Ok(incident)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.repos.incidents().delete(id).await?;
        info!(incident_id = id, "Incident deleted");
        Ok(())
    }

    pub async fn update_status(&self, id: &str, status: &str) -> DomainResult<Incident> {
        let status = IncidentStatus::parse(status)?;
        let mut incident = self.get(id).await?;
        let old_status = incident.status;
        incident.transition_to(status, Utc::now());
        let incident = self.repos.incidents().update(incident).await?;

        info!(incident_id = id, from = %old_status, to = %status, "Incident status changed");
        self.publish_status_change(&incident, old_status);
        Ok(incident)
    }

    fn publish_status_change(&self, incident: &Incident, old_status: IncidentStatus) {
        self.event_bus
            .publish(Event::IncidentStatusChanged(IncidentStatusChangedEvent {
                incident_id: incident.incident_id.clone(),
                old_status: old_status.to_string(),
                new_status: incident.status.to_string(),
            }));
    }

    pub async fn merge_details(
        &self,
        id: &str,
        details: BTreeMap<String, String>,
    ) -> DomainResult<Incident> {
        let mut incident = self.get(id).await?;
        incident.merge_details(details);
        self.repos.incidents().update(incident).await
    }

    async fn technician(&self, id: i64) -> DomainResult<Staff> {
        self.repos
            .staff()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Technician", "id", id))
    }

    /// Hand the incident to a team or to a list of technicians
    pub async fn assign(&self, id: &str, assignment: Assignment) -> DomainResult<Incident> {
        let technician_ids = assignment.technician_ids.unwrap_or_default();
        if assignment.team_id.is_none() && technician_ids.is_empty() {
            return Err(DomainError::Validation(
                "Either teamId or technicianIds is required".into(),
            ));
        }

        let mut incident = self.get(id).await?;
        let event = if let Some(team_id) = assignment.team_id {
            incident.assigned_team_id = Some(team_id);
            Event::TeamAssigned(TeamAssignedEvent {
                incident_id: incident.incident_id.clone(),
                team_id,
                task_description: assignment.task_description.clone(),
            })
        } else {
            let technician = self.technician(technician_ids[0]).await?;
            incident.assigned_technician_id = Some(technician.id);
            incident.assigned_technician_name = Some(technician.full_name());
            Event::TechnicianAssigned(TechnicianAssignedEvent {
                incident_id: incident.incident_id.clone(),
                technician_ids: technician_ids.clone(),
                technician_name: Some(technician.full_name()),
                task_description: assignment.task_description.clone(),
            })
        };
        incident.status = IncidentStatus::Assigned;

        let incident = self.repos.incidents().update(incident).await?;
        info!(incident_id = id, event = event.event_type(), "Incident assigned");
        self.event_bus.publish(event);
        Ok(incident)
    }

    /// Assign a single technician with a concrete task, recording the task
    /// and emailing the technician
    pub async fn assign_technician(
        &self,
        id: &str,
        request: TechnicianAssignment,
    ) -> DomainResult<Incident> {
        let description = non_blank(Some(&request.task_description))
            .ok_or_else(|| DomainError::Validation("Task description is required".into()))?
            .to_string();
        let priority = match non_blank(request.task_priority.as_deref()) {
            Some(p) => TaskPriority::parse(p)?,
            None => TaskPriority::Medium,
        };
        let deadline = request.task_deadline.as_deref().and_then(parse_datetime);

        let technician = self.technician(request.technician_id).await?;
        if technician.role != StaffRole::Technician {
            return Err(DomainError::Validation(format!(
                "Staff {} is not a technician",
                technician.id
            )));
        }

        let mut incident = self.get(id).await?;
        incident.assigned_technician_id = Some(technician.id);
        incident.assigned_technician_name = Some(technician.full_name());
        incident.status = IncidentStatus::Assigned;

        let mut details = BTreeMap::new();
        details.insert("taskDescription".to_string(), description.clone());
        details.insert("taskPriority".to_string(), priority.to_string());
        if let Some(deadline) = deadline {
            details.insert("taskDeadline".to_string(), deadline.to_rfc3339());
        }
        incident.merge_details(details);
        let incident = self.repos.incidents().update(incident).await?;

        let now = Utc::now();
        self.repos
            .incident_tasks()
            .create(IncidentTask {
                id: 0,
                incident_id: incident.incident_id.clone(),
                technician_id: technician.id,
                description: description.clone(),
                priority,
                deadline,
                progress: 0,
                status: IncidentTaskStatus::Pending,
                progress_notes: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        let body = assignment_email_body(
            &technician.full_name(),
            &incident,
            &description,
            priority,
            deadline,
        );
        let subject = format!("Incident assignment: {}", incident.incident_id);
        if let Err(e) = self
            .mailer
            .send(MailMessage::new(&technician.email, subject, body))
            .await
        {
            warn!(technician_id = technician.id, error = %e, "Failed to send assignment email");
        }

        self.event_bus
            .publish(Event::TechnicianAssigned(TechnicianAssignedEvent {
                incident_id: incident.incident_id.clone(),
                technician_ids: vec![technician.id],
                technician_name: Some(technician.full_name()),
                task_description: Some(description),
            }));
        info!(incident_id = id, technician_id = technician.id, "Technician assigned to incident");
        Ok(incident)
    }

    pub async fn tasks(&self, id: &str) -> DomainResult<Vec<IncidentTask>> {
        self.get(id).await?;
        self.repos.incident_tasks().find_by_incident(id).await
    }

    pub async fn frequency(&self) -> DomainResult<BTreeMap<String, u64>> {
        let incidents = self.list().await?;
        Ok(count_by(&incidents, |i| i.incident_type.to_string()))
    }

    pub async fn severity_distribution(&self) -> DomainResult<BTreeMap<String, u64>> {
        let incidents = self.list().await?;
        Ok(count_by(&incidents, |i| i.severity.to_string()))
    }

    pub async fn trends(&self) -> DomainResult<BTreeMap<String, u64>> {
        let incidents = self.list().await?;
        Ok(count_by(&incidents, |i| i.date_time.format("%Y-%m-%d").to_string()))
    }

    pub async fn report_summary(&self) -> DomainResult<IncidentReport> {
        let incidents = self.list().await?;
        Ok(IncidentReport {
            total_bus_incidents: incidents.len() as u64,
            by_type: count_by(&incidents, |i| i.incident_type.to_string()),
            by_severity: count_by(&incidents, |i| i.severity.to_string()),
        })
    }

    /// Statistics over `[start, end]`, defaulting to the last 30 days
    pub async fn stats(&self, filter: StatsFilter) -> DomainResult<IncidentStats> {
        let end = filter.end.unwrap_or_else(Utc::now);
        let start = filter.start.unwrap_or(end - Duration::days(30));
        if start > end {
            return Err(DomainError::Validation(
                "startDate must not be after endDate".into(),
            ));
        }

        let incidents: Vec<Incident> = self
            .list()
            .await?
            .into_iter()
            .filter(|i| i.date_time >= start && i.date_time <= end)
            .filter(|i| filter.incident_type.map_or(true, |t| i.incident_type == t))
            .collect();
        Ok(compute_stats(&incidents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::config::MailConfig;
    use crate::infrastructure::mail::LogMailer;
    use crate::test_support::{repositories, seed_staff};
    use chrono::TimeZone;

    async fn service() -> (IncidentService, Arc<dyn RepositoryProvider>, SharedEventBus) {
        let repos = repositories().await;
        let bus = Arc::new(EventBus::new());
        let mailer = Arc::new(LogMailer::new(&MailConfig::default()));
        (IncidentService::new(repos.clone(), mailer, bus.clone()), repos, bus)
    }

    fn report(kind: &str, severity: &str) -> NewIncident {
        NewIncident {
            incident_type: Some(kind.into()),
            location: Some("Boulevard du 30 Juin".into()),
            severity: Some(severity.into()),
            ..Default::default()
        }
    }

    #[test]
    fn resolution_formatting() {
        assert_eq!(format_resolution(None), "0h 0m");
        assert_eq!(format_resolution(Some(2.5)), "2h 30m");
        assert_eq!(format_resolution(Some(0.25)), "0h 15m");
    }

    #[test]
    fn stats_math() {
        let t0 = Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap();
        let mut a = Incident::new(IncidentType::Fire, "A");
        a.date_time = t0;
        a.severity = Severity::Critical;
        a.transition_to(IncidentStatus::Resolved, t0 + Duration::minutes(90));
        let mut b = Incident::new(IncidentType::Breakdown, "B");
        b.date_time = t0;
        b.transition_to(IncidentStatus::Closed, t0 + Duration::minutes(30));
        let c = Incident::new(IncidentType::Collision, "C");
        let d = Incident::new(IncidentType::Vandalism, "D");

        let stats = compute_stats(&[a, b, c, d]);
        assert_eq!(stats.total_incidents, 4);
        assert_eq!(stats.major_incidents, 1);
        assert_eq!(stats.safety_score, 75.0);
        assert_eq!(stats.average_resolution_time, "1h 0m");
        assert_eq!(stats.resolved_incidents, 2);
        assert_eq!(stats.active_incidents, 2);

        let empty = compute_stats(&[]);
        assert_eq!(empty.safety_score, 100.0);
        assert_eq!(empty.average_resolution_time, "0h 0m");
    }

    #[test]
    fn email_body_layout() {
        let mut incident = Incident::new(IncidentType::EngineFailure, "Limete");
        incident.incident_id = "inc-1".into();
        incident.date_time = Utc.with_ymd_and_hms(2025, 4, 2, 14, 5, 0).unwrap();
        incident.summary = Some("Engine overheating".into());

        let body = assignment_email_body("Paul Mukendi", &incident, "Inspect engine", TaskPriority::High, None);
        assert!(body.starts_with("Dear Paul Mukendi,\n\nYou have been assigned"));
        assert!(body.contains("Incident ID: inc-1\nLocation: Limete\nDate/Time: 2025-04-02 14:05\nDescription: Engine overheating\n"));
        assert!(body.contains("Task Details:\nDescription: Inspect engine\nPriority: HIGH\nDeadline: Not specified\n"));
        assert!(body.ends_with("Best regards,\nImasProject Team"));
    }

    #[tokio::test]
    async fn report_validates_and_defaults() {
        let (svc, _, bus) = service().await;
        let mut sub = bus.subscribe();

        assert!(matches!(
            svc.report(report("METEOR", "LOW")).await,
            Err(DomainError::Validation(_))
        ));

        let mut input = report("fire", "");
        input.date_time = Some("yesterday-ish".into());
        let incident = svc.report(input).await.unwrap();
        assert_eq!(incident.status, IncidentStatus::Reported);
        assert_eq!(incident.severity, Severity::Low);
        assert!((Utc::now() - incident.date_time).num_seconds() < 5);

        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.event.event_type(), "incident_reported");

        let fetched = svc.get(&incident.incident_id).await.unwrap();
        assert_eq!(fetched.incident_type, IncidentType::Fire);
    }

    #[tokio::test]
    async fn status_changes_stamp_resolution() {
        let (svc, _, _) = service().await;
        let incident = svc.report(report("BREAKDOWN", "HIGH")).await.unwrap();

        assert!(matches!(
            svc.update_status(&incident.incident_id, "DONE").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.update_status("missing", "RESOLVED").await,
            Err(DomainError::NotFound { .. })
        ));

        let resolved = svc.update_status(&incident.incident_id, "resolved").await.unwrap();
        assert!(resolved.resolution_time.is_some());
        let closed = svc.update_status(&incident.incident_id, "CLOSED").await.unwrap();
        assert_eq!(closed.resolution_time, resolved.resolution_time);
    }

    #[tokio::test]
    async fn assignment_paths() {
        let (svc, repos, _) = service().await;
        let tech = seed_staff(repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;
        let driver = seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let incident = svc.report(report("TIRE_BLOWOUT", "MEDIUM")).await.unwrap();
        let id = incident.incident_id.as_str();

        assert!(matches!(
            svc.assign(id, Assignment::default()).await,
            Err(DomainError::Validation(_))
        ));

        let by_team = svc
            .assign(id, Assignment { team_id: Some(4), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(by_team.status, IncidentStatus::Assigned);
        assert_eq!(by_team.assigned_team_id, Some(4));

        let by_tech = svc
            .assign(
                id,
                Assignment {
                    technician_ids: Some(vec![tech.id, driver.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_tech.assigned_technician_id, Some(tech.id));

        let request = |tid| TechnicianAssignment {
            technician_id: tid,
            task_description: "Replace tyre".into(),
            task_priority: Some("high".into()),
            task_deadline: Some("2025-06-01T10:00".into()),
        };
        assert!(matches!(
            svc.assign_technician(id, request(driver.id)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.assign_technician(id, request(9999)).await,
            Err(DomainError::NotFound { .. })
        ));

        let assigned = svc.assign_technician(id, request(tech.id)).await.unwrap();
        assert_eq!(assigned.additional_details["taskPriority"], "HIGH");
        assert_eq!(assigned.additional_details["taskDescription"], "Replace tyre");
        let tasks = svc.tasks(id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, IncidentTaskStatus::Pending);
        assert_eq!(svc.technician_history(tech.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn aggregates() {
        let (svc, _, _) = service().await;
        svc.report(report("FIRE", "CRITICAL")).await.unwrap();
        svc.report(report("FIRE", "LOW")).await.unwrap();
        svc.report(report("COLLISION", "HIGH")).await.unwrap();

        let freq = svc.frequency().await.unwrap();
        assert_eq!(freq["FIRE"], 2);
        assert_eq!(freq["COLLISION"], 1);

        let report = svc.report_summary().await.unwrap();
        assert_eq!(report.total_bus_incidents, 3);
        assert_eq!(report.by_severity["CRITICAL"], 1);

        let stats = svc.stats(StatsFilter::default()).await.unwrap();
        assert_eq!(stats.total_incidents, 3);
        assert_eq!(stats.major_incidents, 2);

        let fires = svc
            .stats(StatsFilter {
                incident_type: Some(IncidentType::Fire),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(fires.total_incidents, 2);
        assert_eq!(fires.safety_score, 50.0);

        assert_eq!(svc.trends().await.unwrap().values().sum::<u64>(), 3);
        assert!(svc.latest_for_bus(1).await.is_err());
    }
}

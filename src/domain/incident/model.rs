//! Incident domain entities

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

crate::wire_enum! {
    pub enum IncidentType("incident type") {
        Collision => "COLLISION",
        Breakdown => "BREAKDOWN",
        TrafficAccident => "TRAFFIC_ACCIDENT",
        PassengerInjury => "PASSENGER_INJURY",
        EquipmentMalfunction => "EQUIPMENT_MALFUNCTION",
        TireBlowout => "TIRE_BLOWOUT",
        EngineFailure => "ENGINE_FAILURE",
        BrakeFailure => "BRAKE_FAILURE",
        DoorMalfunction => "DOOR_MALFUNCTION",
        FuelLeak => "FUEL_LEAK",
        Fire => "FIRE",
        Vandalism => "VANDALISM",
        RoadObstruction => "ROAD_OBSTRUCTION",
        WeatherRelated => "WEATHER_RELATED",
    }
}

crate::wire_enum! {
    pub enum IncidentStatus("incident status") {
        Reported => "REPORTED",
        Investigating => "INVESTIGATING",
        Responding => "RESPONDING",
        Assigned => "ASSIGNED",
        Contained => "CONTAINED",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

impl IncidentStatus {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

crate::wire_enum! {
    /// Shared by incidents and emergency reports
    pub enum Severity("severity") {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

impl Severity {
    pub fn is_major(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

crate::wire_enum! {
    pub enum TaskPriority("task priority") {
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
}

crate::wire_enum! {
    pub enum IncidentTaskStatus("task status") {
        Pending => "PENDING",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

/// A reported bus-related event
#[derive(Debug, Clone)]
pub struct Incident {
    /// UUID string
    pub incident_id: String,
    pub incident_type: IncidentType,
    pub location: String,
    pub severity: Severity,
    pub date_time: DateTime<Utc>,
    pub status: IncidentStatus,
    pub summary: Option<String>,
    pub bus_id: Option<i64>,
    pub assigned_technician_id: Option<i64>,
    pub assigned_technician_name: Option<String>,
    pub assigned_team_id: Option<i64>,
    pub resolution_time: Option<DateTime<Utc>>,
    pub additional_details: BTreeMap<String, String>,
}

impl Incident {
    pub fn new(incident_type: IncidentType, location: impl Into<String>) -> Self {
        Self {
            incident_id: uuid::Uuid::new_v4().to_string(),
            incident_type,
            location: location.into(),
            severity: Severity::Low,
            date_time: Utc::now(),
            status: IncidentStatus::Reported,
            summary: None,
            bus_id: None,
            assigned_technician_id: None,
            assigned_technician_name: None,
            assigned_team_id: None,
            resolution_time: None,
            additional_details: BTreeMap::new(),
        }
    }

    /// Apply a status change. RESOLVED always stamps the resolution time,
    /// CLOSED only when none is recorded yet.
    pub fn transition_to(&mut self, status: IncidentStatus, now: DateTime<Utc>) {
        match status {
            IncidentStatus::Resolved => self.resolution_time = Some(now),
            IncidentStatus::Closed if self.resolution_time.is_none() => {
                self.resolution_time = Some(now)
            }
            _ => {}
        }
        self.status = status;
    }

    pub fn merge_details<I>(&mut self, details: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.additional_details.extend(details);
    }

    /// Minutes from report to resolution, if resolved
    pub fn resolution_minutes(&self) -> Option<i64> {
        self.resolution_time
            .map(|resolved| crate::shared::minutes_between(self.date_time, resolved))
    }
}

/// A unit of work created when a technician is assigned to an incident
#[derive(Debug, Clone)]
pub struct IncidentTask {
    pub id: i64,
    pub incident_id: String,
    pub technician_id: i64,
    pub description: String,
    pub priority: TaskPriority,
    pub deadline: Option<DateTime<Utc>>,
    /// 0..=100
    pub progress: i32,
    pub status: IncidentTaskStatus,
    pub progress_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn resolved_always_stamps_resolution_time() {
        let t0 = Utc::now();
        let mut incident = Incident::new(IncidentType::Fire, "Gare Centrale");
        incident.transition_to(IncidentStatus::Resolved, t0);
        assert_eq!(incident.resolution_time, Some(t0));

        let t1 = t0 + Duration::hours(1);
        incident.transition_to(IncidentStatus::Resolved, t1);
        assert_eq!(incident.resolution_time, Some(t1));
    }

    #[test]
    fn closed_keeps_existing_resolution_time() {
        let t0 = Utc::now();
        let mut incident = Incident::new(IncidentType::Breakdown, "Limete");
        incident.transition_to(IncidentStatus::Closed, t0);
        assert_eq!(incident.resolution_time, Some(t0));

        incident.transition_to(IncidentStatus::Closed, t0 + Duration::hours(2));
        assert_eq!(incident.resolution_time, Some(t0));
        assert!(!incident.status.is_active());
    }

    #[test]
    fn major_severities() {
        assert!(Severity::High.is_major());
        assert!(Severity::Critical.is_major());
        assert!(!Severity::Medium.is_major());
    }
}

//! Transit events
//!
//! Facts published on the event bus and streamed to WebSocket clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    TicketIssued(TicketIssuedEvent),
    TicketBoarded(TicketBoardedEvent),
    BusLocationUpdated(BusLocationEvent),
    IncidentReported(IncidentReportedEvent),
    TeamAssigned(TeamAssignedEvent),
    TechnicianAssigned(TechnicianAssignedEvent),
    IncidentStatusChanged(IncidentStatusChangedEvent),
    TaskStatusChanged(TaskStatusChangedEvent),
    NotificationCreated(NotificationCreatedEvent),
    TrafficDataRecorded(TrafficDataRecordedEvent),
    EmergencyReported(EmergencyReportedEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::TicketIssued(_) => "ticket_issued",
            Event::TicketBoarded(_) => "ticket_boarded",
            Event::BusLocationUpdated(_) => "bus_location_updated",
            Event::IncidentReported(_) => "incident_reported",
            Event::TeamAssigned(_) => "team_assigned",
            Event::TechnicianAssigned(_) => "technician_assigned",
            Event::IncidentStatusChanged(_) => "incident_status_changed",
            Event::TaskStatusChanged(_) => "task_status_changed",
            Event::NotificationCreated(_) => "notification_created",
            Event::TrafficDataRecorded(_) => "traffic_data_recorded",
            Event::EmergencyReported(_) => "emergency_reported",
        }
    }

    /// Staff member the event is addressed to, when it has one
    pub fn recipient_id(&self) -> Option<i64> {
        match self {
            Event::TicketIssued(e) => Some(e.passenger_id),
            Event::TechnicianAssigned(e) => e.technician_ids.first().copied(),
            Event::TaskStatusChanged(e) => e.technician_id,
            Event::NotificationCreated(e) => e.recipient_id,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketIssuedEvent {
    pub ticket_id: i64,
    pub ticket_number: String,
    pub bus_id: i64,
    pub passenger_id: i64,
    pub seat_number: String,
    pub departure_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketBoardedEvent {
    pub ticket_id: i64,
    pub ticket_number: String,
    pub bus_id: i64,
    pub boarded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusLocationEvent {
    pub bus_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReportedEvent {
    pub incident_id: String,
    pub incident_type: String,
    pub severity: String,
    pub location: String,
    pub bus_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAssignedEvent {
    pub incident_id: String,
    pub team_id: i64,
    pub task_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicianAssignedEvent {
    pub incident_id: String,
    pub technician_ids: Vec<i64>,
    pub technician_name: Option<String>,
    pub task_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentStatusChangedEvent {
    pub incident_id: String,
    pub old_status: String,
    pub new_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusChangedEvent {
    pub task_id: String,
    pub old_status: String,
    pub new_status: String,
    pub technician_id: Option<i64>,
    /// ACCEPTED, REJECTED or COMPLETED
    pub notice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreatedEvent {
    pub notification_id: i64,
    pub message: String,
    pub notification_type: String,
    pub recipient_id: Option<i64>,
    pub recipient_type: Option<String>,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficDataRecordedEvent {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub traffic_level: i32,
    pub average_speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyReportedEvent {
    pub report_id: i64,
    pub driver_id: i64,
    pub bus_id: Option<i64>,
    pub emergency_type: String,
    pub severity: String,
    pub location: String,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_as_type_data_timestamp() {
        let msg = EventMessage::new(Event::IncidentStatusChanged(IncidentStatusChangedEvent {
            incident_id: "abc".into(),
            old_status: "REPORTED".into(),
            new_status: "RESOLVED".into(),
        }));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "incident_status_changed");
        assert_eq!(json["data"]["new_status"], "RESOLVED");
        assert!(json["timestamp"].is_string());
        assert_eq!(msg.event.event_type(), "incident_status_changed");
    }
}

//! Emergency report domain entity

use chrono::{DateTime, Utc};

use crate::domain::incident::Severity;

crate::wire_enum! {
    pub enum EmergencyType("emergency type") {
        Accident => "ACCIDENT",
        Breakdown => "BREAKDOWN",
        Medical => "MEDICAL",
        Fire => "FIRE",
        Security => "SECURITY",
        Other => "OTHER",
    }
}

crate::wire_enum! {
    pub enum EmergencyStatus("emergency status") {
        Pending => "PENDING",
        InProgress => "IN_PROGRESS",
        Resolved => "RESOLVED",
        Cancelled => "CANCELLED",
    }
}

/// An emergency raised by a driver from the road
#[derive(Debug, Clone)]
pub struct EmergencyReport {
    pub id: i64,
    pub driver_id: i64,
    pub bus_id: Option<i64>,
    pub emergency_type: EmergencyType,
    pub location: String,
    pub description: String,
    pub severity: Severity,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: EmergencyStatus,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmergencyReport {
    pub fn is_high_priority(&self) -> bool {
        self.severity.is_major()
    }
}

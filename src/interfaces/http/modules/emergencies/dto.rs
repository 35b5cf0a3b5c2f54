//! Emergency report DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::emergency::NewEmergency;
use crate::domain::emergency::EmergencyReport;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyReportDto {
    pub id: i64,
    pub driver_id: i64,
    pub bus_id: Option<i64>,
    #[serde(rename = "type")]
    pub emergency_type: String,
    pub location: String,
    pub description: String,
    pub severity: String,
    pub coordinates: Option<Coordinates>,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmergencyReport> for EmergencyReportDto {
    fn from(r: EmergencyReport) -> Self {
        let coordinates = match (r.latitude, r.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        Self {
            id: r.id,
            driver_id: r.driver_id,
            bus_id: r.bus_id,
            emergency_type: r.emergency_type.to_string(),
            location: r.location,
            description: r.description,
            severity: r.severity.to_string(),
            coordinates,
            status: r.status.to_string(),
            timestamp: r.timestamp,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    pub driver_id: Option<i64>,
    pub bus_id: Option<i64>,
    #[serde(rename = "type")]
    pub emergency_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl From<EmergencyRequest> for NewEmergency {
    fn from(r: EmergencyRequest) -> Self {
        Self {
            driver_id: r.driver_id,
            bus_id: r.bus_id,
            emergency_type: r.emergency_type,
            location: r.location,
            description: r.description,
            severity: r.severity,
            latitude: r.coordinates.map(|c| c.lat),
            longitude: r.coordinates.map(|c| c.lng),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmergencyStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentDaysParams {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_split_into_latitude_and_longitude() {
        let req: EmergencyRequest = serde_json::from_str(
            r#"{"driverId": 3, "type": "FIRE", "location": "Kintambo", "description": "Smoke",
                "severity": "HIGH", "coordinates": {"lat": -4.33, "lng": 15.27}}"#,
        )
        .unwrap();
        let input = NewEmergency::from(req);
        assert_eq!(input.latitude, Some(-4.33));
        assert_eq!(input.longitude, Some(15.27));
        assert_eq!(input.emergency_type.as_deref(), Some("FIRE"));
    }
}

//! Vehicle DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::fleet::{
    FleetStatistics, LocationFix, VehicleInput, DEFAULT_MINUTES_BACK, DEFAULT_RADIUS_KM,
};
use crate::domain::vehicle::{Vehicle, VehicleLocation};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i64,
    pub vehicle_number: String,
    pub license_plate: String,
    pub capacity: i32,
    pub vehicle_type: Option<String>,
    pub is_accessible: bool,
    pub status: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub has_air_conditioning: bool,
    pub has_wifi: bool,
    pub has_gps: bool,
    pub odometer_reading: Option<f64>,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
    pub current_passengers: i32,
    pub route_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            vehicle_number: v.vehicle_number,
            license_plate: v.license_plate,
            capacity: v.capacity,
            vehicle_type: v.vehicle_type,
            is_accessible: v.is_accessible,
            status: v.status.to_string(),
            manufacturer: v.manufacturer,
            model: v.model,
            year: v.year,
            fuel_type: v.fuel_type.map(|f| f.to_string()),
            has_air_conditioning: v.has_air_conditioning,
            has_wifi: v.has_wifi,
            has_gps: v.has_gps,
            odometer_reading: v.odometer_reading,
            last_maintenance: v.last_maintenance,
            next_maintenance: v.next_maintenance,
            current_passengers: v.current_passengers,
            route_id: v.route_id,
            is_active: v.is_active,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub vehicle_number: Option<String>,
    pub license_plate: Option<String>,
    pub capacity: Option<i32>,
    pub vehicle_type: Option<String>,
    pub is_accessible: Option<bool>,
    pub status: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub has_air_conditioning: Option<bool>,
    pub has_wifi: Option<bool>,
    pub has_gps: Option<bool>,
    pub odometer_reading: Option<f64>,
    pub next_maintenance: Option<String>,
    pub current_passengers: Option<i32>,
    pub route_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<VehicleRequest> for VehicleInput {
    fn from(r: VehicleRequest) -> Self {
        Self {
            vehicle_number: r.vehicle_number,
            license_plate: r.license_plate,
            capacity: r.capacity,
            vehicle_type: r.vehicle_type,
            is_accessible: r.is_accessible,
            status: r.status,
            manufacturer: r.manufacturer,
            model: r.model,
            year: r.year,
            fuel_type: r.fuel_type,
            has_air_conditioning: r.has_air_conditioning,
            has_wifi: r.has_wifi,
            has_gps: r.has_gps,
            odometer_reading: r.odometer_reading,
            next_maintenance: r.next_maintenance,
            current_passengers: r.current_passengers,
            route_id: r.route_id,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VehicleStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationFixRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
}

impl From<LocationFixRequest> for LocationFix {
    fn from(r: LocationFixRequest) -> Self {
        Self {
            latitude: r.latitude,
            longitude: r.longitude,
            speed: r.speed,
            heading: r.heading,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLocationDto {
    pub id: i64,
    pub vehicle_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl From<VehicleLocation> for VehicleLocationDto {
    fn from(l: VehicleLocation) -> Self {
        Self {
            id: l.id,
            vehicle_id: l.vehicle_id,
            latitude: l.latitude,
            longitude: l.longitude,
            speed: l.speed,
            heading: l.heading,
            recorded_at: l.recorded_at,
        }
    }
}

/// The latest fix, or a message when the vehicle never reported one
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LatestLocationResponse {
    Fix(VehicleLocationDto),
    Empty { message: String },
}

impl From<Option<VehicleLocation>> for LatestLocationResponse {
    fn from(location: Option<VehicleLocation>) -> Self {
        match location {
            Some(l) => Self::Fix(l.into()),
            None => Self::Empty {
                message: "No location data available".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatisticsDto {
    pub total_vehicles: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub average_capacity: f64,
    pub total_capacity: i64,
    pub active_vehicles: usize,
}

impl From<FleetStatistics> for FleetStatisticsDto {
    fn from(s: FleetStatistics) -> Self {
        Self {
            total_vehicles: s.total_vehicles,
            by_status: s.by_status,
            by_type: s.by_type,
            average_capacity: s.average_capacity,
            total_capacity: s.total_capacity,
            active_vehicles: s.active_vehicles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_location_is_a_message() {
        let json = serde_json::to_value(LatestLocationResponse::from(None)).unwrap();
        assert_eq!(json, serde_json::json!({"message": "No location data available"}));
    }
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

fn default_minutes_back() -> i64 {
    DEFAULT_MINUTES_BACK
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RadiusParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to 5 km
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    /// Only fixes this recent count; defaults to 60
    #[serde(default = "default_minutes_back")]
    pub minutes_back: i64,
}

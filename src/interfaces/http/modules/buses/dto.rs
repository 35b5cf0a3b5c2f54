//! Bus DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::fleet::BusInput;
use crate::domain::bus::Bus;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusDto {
    pub id: i64,
    pub name: String,
    pub bus_line: Option<String>,
    pub capacity: i32,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    pub current_lat: Option<f64>,
    pub current_lng: Option<f64>,
    pub passengers: i32,
    pub progress: f64,
    pub is_stopped: bool,
    pub has_accident: bool,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub driver_id: Option<i64>,
    pub route_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Bus> for BusDto {
    fn from(b: Bus) -> Self {
        Self {
            id: b.id,
            name: b.name,
            bus_line: b.bus_line,
            capacity: b.capacity,
            start_lat: b.start_lat,
            start_lng: b.start_lng,
            end_lat: b.end_lat,
            end_lng: b.end_lng,
            current_lat: b.current_lat,
            current_lng: b.current_lng,
            passengers: b.passengers,
            progress: b.progress,
            is_stopped: b.is_stopped,
            has_accident: b.has_accident,
            departure_time: b.departure_time,
            arrival_time: b.arrival_time,
            driver_id: b.driver_id,
            route_id: b.route_id,
            created_at: b.created_at,
        }
    }
}

/// Create/update body; absent fields keep their value on update
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusRequest {
    pub name: Option<String>,
    pub bus_line: Option<String>,
    pub capacity: Option<i32>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub driver_id: Option<i64>,
    pub route_id: Option<i64>,
}

impl From<BusRequest> for BusInput {
    fn from(r: BusRequest) -> Self {
        BusInput {
            name: r.name,
            bus_line: r.bus_line,
            capacity: r.capacity,
            start_lat: r.start_lat,
            start_lng: r.start_lng,
            end_lat: r.end_lat,
            end_lng: r.end_lng,
            departure_time: r.departure_time,
            arrival_time: r.arrival_time,
            driver_id: r.driver_id,
            route_id: r.route_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
    pub progress: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccidentRequest {
    pub has_accident: bool,
}

//! Traffic DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::traffic::{
    BoundingBox, CurrentLevel, HourlyStat, Hotspot, TrafficInput, TrafficSummary, DEFAULT_RADIUS,
};
use crate::domain::traffic::TrafficData;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficDataDto {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub traffic_level: i32,
    pub average_speed: Option<f64>,
    pub weather_condition: Option<String>,
    pub is_holiday: bool,
    pub day_of_week: i32,
    pub hour_of_day: i32,
    pub vehicle_count: Option<i32>,
    pub visibility: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub road_type: Option<String>,
    pub event_type: Option<String>,
}

impl From<TrafficData> for TrafficDataDto {
    fn from(d: TrafficData) -> Self {
        Self {
            id: d.id,
            latitude: d.latitude,
            longitude: d.longitude,
            timestamp: d.timestamp,
            traffic_level: d.traffic_level,
            average_speed: d.average_speed,
            weather_condition: d.weather_condition,
            is_holiday: d.is_holiday,
            day_of_week: d.day_of_week,
            hour_of_day: d.hour_of_day,
            vehicle_count: d.vehicle_count,
            visibility: d.visibility,
            temperature: d.temperature,
            humidity: d.humidity,
            road_type: d.road_type,
            event_type: d.event_type,
        }
    }
}

/// One observation; timestamp, day and hour are stamped by the server
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// 1 (free flow) to 5 (blocked)
    pub traffic_level: Option<i32>,
    pub average_speed: Option<f64>,
    pub weather_condition: Option<String>,
    pub is_holiday: Option<bool>,
    pub vehicle_count: Option<i32>,
    pub visibility: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub road_type: Option<String>,
    pub event_type: Option<String>,
}

impl From<TrafficRequest> for TrafficInput {
    fn from(r: TrafficRequest) -> Self {
        Self {
            latitude: r.latitude,
            longitude: r.longitude,
            traffic_level: r.traffic_level,
            average_speed: r.average_speed,
            weather_condition: r.weather_condition,
            is_holiday: r.is_holiday,
            vehicle_count: r.vehicle_count,
            visibility: r.visibility,
            temperature: r.temperature,
            humidity: r.humidity,
            road_type: r.road_type,
            event_type: r.event_type,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AreaParams {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSearchRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub min_traffic_level: Option<i32>,
    pub max_traffic_level: Option<i32>,
    pub weather_condition: Option<String>,
    pub is_holiday: Option<bool>,
    pub day_of_week: Option<i32>,
    pub hour_of_day: Option<i32>,
    pub road_type: Option<String>,
    pub event_type: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HotspotParams {
    #[serde(default = "default_day")]
    pub hours: i64,
    #[serde(default = "default_min_level")]
    pub min_level: f64,
}

fn default_day() -> i64 {
    24
}

fn default_min_level() -> f64 {
    3.0
}

/// Window plus an optional bounding box; the box applies only when all
/// four bounds are given
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HourlyParams {
    #[serde(default = "default_day")]
    pub hours: i64,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

impl HourlyParams {
    pub fn area(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            lat_min: self.lat_min?,
            lat_max: self.lat_max?,
            lon_min: self.lon_min?,
            lon_max: self.lon_max?,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RushHourParams {
    #[serde(default = "default_week")]
    pub hours: i64,
}

fn default_week() -> i64 {
    168
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryParams {
    /// Start of the window; defaults to 24 hours ago
    pub since: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentLevelDto {
    pub level: i32,
    pub description: String,
}

impl From<CurrentLevel> for CurrentLevelDto {
    fn from(c: CurrentLevel) -> Self {
        Self {
            level: c.level,
            description: c.description.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotspotDto {
    pub latitude: f64,
    pub longitude: f64,
    pub average_level: f64,
    pub samples: usize,
}

impl From<Hotspot> for HotspotDto {
    fn from(h: Hotspot) -> Self {
        Self {
            latitude: h.latitude,
            longitude: h.longitude,
            average_level: h.average_level,
            samples: h.samples,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStatDto {
    pub hour: i32,
    pub average_traffic_level: f64,
    pub average_speed: Option<f64>,
    pub samples: usize,
}

impl From<HourlyStat> for HourlyStatDto {
    fn from(h: HourlyStat) -> Self {
        Self {
            hour: h.hour,
            average_traffic_level: h.average_traffic_level,
            average_speed: h.average_speed,
            samples: h.samples,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSummaryDto {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub total_records: usize,
    pub average_traffic_level: f64,
    pub average_speed: f64,
    pub level_distribution: BTreeMap<String, usize>,
}

impl From<TrafficSummary> for TrafficSummaryDto {
    fn from(s: TrafficSummary) -> Self {
        Self {
            since: s.since,
            until: s.until,
            total_records: s.total_records,
            average_traffic_level: s.average_traffic_level,
            average_speed: s.average_speed,
            level_distribution: s.level_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_bounding_box_is_ignored() {
        let params = HourlyParams {
            hours: 24,
            lat_min: Some(-4.4),
            lat_max: Some(-4.2),
            lon_min: Some(15.2),
            lon_max: None,
        };
        assert!(params.area().is_none());
        let full = HourlyParams { lon_max: Some(15.4), ..params };
        assert!(full.area().is_some());
    }
}

//! Route and stop DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::scheduling::{RouteInput, StopInput};
use crate::domain::route::{Route, Stop};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: i64,
    pub route_name: String,
    pub route_code: String,
    pub description: Option<String>,
    /// Kilometres
    pub total_distance: Option<f64>,
    /// Minutes
    pub estimated_duration: Option<i32>,
    pub color: Option<String>,
    pub route_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Route> for RouteDto {
    fn from(r: Route) -> Self {
        Self {
            id: r.id,
            route_name: r.route_name,
            route_code: r.route_code,
            description: r.description,
            total_distance: r.total_distance,
            estimated_duration: r.estimated_duration,
            color: r.color,
            route_type: r.route_type.to_string(),
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub route_name: Option<String>,
    pub route_code: Option<String>,
    pub description: Option<String>,
    pub total_distance: Option<f64>,
    pub estimated_duration: Option<i32>,
    pub color: Option<String>,
    pub route_type: Option<String>,
    pub is_active: Option<bool>,
}

impl From<RouteRequest> for RouteInput {
    fn from(r: RouteRequest) -> Self {
        Self {
            route_name: r.route_name,
            route_code: r.route_code,
            description: r.description,
            total_distance: r.total_distance,
            estimated_duration: r.estimated_duration,
            color: r.color,
            route_type: r.route_type,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub id: i64,
    pub route_id: i64,
    pub stop_name: String,
    pub stop_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub sequence_order: i32,
    pub has_shelter: bool,
    pub is_accessible: bool,
    pub zone: Option<String>,
    pub is_active: bool,
}

impl From<Stop> for StopDto {
    fn from(s: Stop) -> Self {
        Self {
            id: s.id,
            route_id: s.route_id,
            stop_name: s.stop_name,
            stop_code: s.stop_code,
            latitude: s.latitude,
            longitude: s.longitude,
            sequence_order: s.sequence_order,
            has_shelter: s.has_shelter,
            is_accessible: s.is_accessible,
            zone: s.zone,
            is_active: s.is_active,
        }
    }
}

/// New stop; `sequenceOrder` defaults to after the current last stop
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopRequest {
    pub stop_name: Option<String>,
    pub stop_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sequence_order: Option<i32>,
    pub has_shelter: Option<bool>,
    pub is_accessible: Option<bool>,
    pub zone: Option<String>,
}

impl From<StopRequest> for StopInput {
    fn from(r: StopRequest) -> Self {
        Self {
            stop_name: r.stop_name,
            stop_code: r.stop_code,
            latitude: r.latitude,
            longitude: r.longitude,
            sequence_order: r.sequence_order,
            has_shelter: r.has_shelter,
            is_accessible: r.is_accessible,
            zone: r.zone,
        }
    }
}

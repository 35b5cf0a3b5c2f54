//! Schedule DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::scheduling::ScheduleInput;
use crate::domain::schedule::Schedule;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    pub id: i64,
    pub bus_id: i64,
    pub driver_id: i64,
    pub route_id: i64,
    pub day_of_week: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub estimated_duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Schedule> for ScheduleDto {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            bus_id: s.bus_id,
            driver_id: s.driver_id,
            route_id: s.route_id,
            day_of_week: s.day_of_week.to_string(),
            departure_time: s.departure_time,
            arrival_time: s.arrival_time,
            estimated_duration_minutes: s.estimated_duration_minutes,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// `arrivalTime` defaults to departure + duration, `dayOfWeek` to the
/// departure's weekday
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub bus_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub route_id: Option<i64>,
    pub day_of_week: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<ScheduleRequest> for ScheduleInput {
    fn from(r: ScheduleRequest) -> Self {
        Self {
            bus_id: r.bus_id,
            driver_id: r.driver_id,
            route_id: r.route_id,
            day_of_week: r.day_of_week,
            departure_time: r.departure_time,
            arrival_time: r.arrival_time,
            estimated_duration_minutes: r.estimated_duration_minutes,
            is_active: r.is_active,
        }
    }
}

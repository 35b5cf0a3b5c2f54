//! Traffic observation domain entity

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::domain::{DomainError, DomainResult};

/// One traffic observation at a coordinate
#[derive(Debug, Clone)]
pub struct TrafficData {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    /// 1 (free flowing) ..= 5 (blocked)
    pub traffic_level: i32,
    /// km/h
    pub average_speed: Option<f64>,
    pub weather_condition: Option<String>,
    pub is_holiday: bool,
    /// 1 = Monday ..= 7 = Sunday
    pub day_of_week: i32,
    pub hour_of_day: i32,
    pub vehicle_count: Option<i32>,
    pub visibility: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub road_type: Option<String>,
    pub event_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrafficData {
    /// Stamp the observation time and its derived calendar fields
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.timestamp = now;
        self.day_of_week = now.weekday().number_from_monday() as i32;
        self.hour_of_day = now.hour() as i32;
    }

    pub fn validate_level(level: i32) -> DomainResult<i32> {
        if (1..=5).contains(&level) {
            Ok(level)
        } else {
            Err(DomainError::Validation(
                "Traffic level must be between 1 and 5".into(),
            ))
        }
    }

    pub fn in_box(&self, lat: f64, lng: f64, radius: f64) -> bool {
        (self.latitude - lat).abs() <= radius && (self.longitude - lng).abs() <= radius
    }
}

/// Human label for a traffic level
pub fn level_description(level: i32) -> &'static str {
    match level {
        1 => "Fluide",
        2 => "Modéré",
        3 => "Dense",
        4 => "Embouteillé",
        5 => "Bloqué",
        _ => "Inconnu",
    }
}

/// Filters for an advanced traffic search
#[derive(Debug, Clone, Default)]
pub struct TrafficQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stamping_derives_calendar_fields() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 17, 45, 0).unwrap(); // Sunday
        let mut d = TrafficData {
            id: 0,
            latitude: 0.0,
            longitude: 0.0,
            timestamp: now,
            traffic_level: 3,
            average_speed: None,
            weather_condition: None,
            is_holiday: false,
            day_of_week: 0,
            hour_of_day: 0,
            vehicle_count: None,
            visibility: None,
            temperature: None,
            humidity: None,
            road_type: None,
            event_type: None,
            created_at: now,
            updated_at: now,
        };
        d.stamp(now);
        assert_eq!(d.day_of_week, 7);
        assert_eq!(d.hour_of_day, 17);
        assert!(d.in_box(0.005, -0.005, 0.01));
        assert!(!d.in_box(0.02, 0.0, 0.01));
    }

    #[test]
    fn levels() {
        assert!(TrafficData::validate_level(0).is_err());
        assert!(TrafficData::validate_level(6).is_err());
        assert_eq!(TrafficData::validate_level(5).unwrap(), 5);
        assert_eq!(level_description(1), "Fluide");
        assert_eq!(level_description(5), "Bloqué");
    }
}

//! Bus domain entity

use chrono::{DateTime, Utc};

/// A bus operating a line, with its live position and trip progress
#[derive(Debug, Clone)]
pub struct Bus {
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
    /// Trip progress, 0.0 at the start stop and 1.0 at the terminus
    pub progress: f64,
    pub is_stopped: bool,
    pub has_accident: bool,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub driver_id: Option<i64>,
    pub route_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Bus {
    pub fn new(name: impl Into<String>, capacity: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            bus_line: None,
            capacity,
            start_lat: None,
            start_lng: None,
            end_lat: None,
            end_lng: None,
            current_lat: None,
            current_lng: None,
            passengers: 0,
            progress: 0.0,
            is_stopped: false,
            has_accident: false,
            departure_time: None,
            arrival_time: None,
            driver_id: None,
            route_id: None,
            created_at: Utc::now(),
        }
    }

    /// Whether `seat` is a valid seat number on this bus
    pub fn has_seat(&self, seat: u32) -> bool {
        seat >= 1 && i64::from(seat) <= i64::from(self.capacity)
    }

    pub fn update_location(&mut self, lat: f64, lng: f64, progress: Option<f64>) {
        self.current_lat = Some(lat);
        self.current_lng = Some(lng);
        if let Some(p) = progress {
            self.progress = p.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_are_one_based() {
        let bus = Bus::new("B-12", 40);
        assert!(!bus.has_seat(0));
        assert!(bus.has_seat(1));
        assert!(bus.has_seat(40));
        assert!(!bus.has_seat(41));
    }

    #[test]
    fn progress_is_clamped() {
        let mut bus = Bus::new("B-12", 40);
        bus.update_location(-4.3, 15.3, Some(1.7));
        assert_eq!(bus.progress, 1.0);
        assert_eq!(bus.current_lat, Some(-4.3));
        bus.update_location(-4.31, 15.31, None);
        assert_eq!(bus.progress, 1.0);
    }
}

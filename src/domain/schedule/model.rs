//! Bus schedule domain entity

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

crate::wire_enum! {
    pub enum DayOfWeek("day of week") {
        Monday => "MONDAY",
        Tuesday => "TUESDAY",
        Wednesday => "WEDNESDAY",
        Thursday => "THURSDAY",
        Friday => "FRIDAY",
        Saturday => "SATURDAY",
        Sunday => "SUNDAY",
    }
}

impl DayOfWeek {
    pub fn of(dt: DateTime<Utc>) -> Self {
        match dt.weekday() {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

/// A recurring bus departure with its driver and route
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: i64,
    pub bus_id: i64,
    pub driver_id: i64,
    pub route_id: i64,
    pub day_of_week: DayOfWeek,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Always > 0
    pub estimated_duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Arrival defaults to departure plus the estimated duration
pub fn default_arrival(departure: DateTime<Utc>, duration_minutes: i32) -> DateTime<Utc> {
    departure + Duration::minutes(i64::from(duration_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn weekday_and_arrival_defaults() {
        // 2025-03-03 is a Monday
        let dep = Utc.with_ymd_and_hms(2025, 3, 3, 23, 30, 0).unwrap();
        assert_eq!(DayOfWeek::of(dep), DayOfWeek::Monday);
        assert_eq!(
            default_arrival(dep, 45),
            Utc.with_ymd_and_hms(2025, 3, 4, 0, 15, 0).unwrap()
        );
    }
}

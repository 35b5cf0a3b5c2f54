//! Route and stop domain entities

use chrono::{DateTime, Utc};

crate::wire_enum! {
    pub enum RouteType("route type") {
        Urban => "URBAN",
        Suburban => "SUBURBAN",
        Intercity => "INTERCITY",
        Express => "EXPRESS",
        Local => "LOCAL",
        Shuttle => "SHUTTLE",
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub id: i64,
    pub route_name: String,
    /// Unique
    pub route_code: String,
    pub description: Option<String>,
    /// Kilometres
    pub total_distance: Option<f64>,
    /// Minutes
    pub estimated_duration: Option<i32>,
    pub color: Option<String>,
    pub route_type: RouteType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    pub fn new(
        route_name: impl Into<String>,
        route_code: impl Into<String>,
        route_type: RouteType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            route_name: route_name.into(),
            route_code: route_code.into(),
            description: None,
            total_distance: None,
            estimated_duration: None,
            color: None,
            route_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stop {
    pub id: i64,
    pub route_id: i64,
    pub stop_name: String,
    pub stop_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// 1-based position along the route
    pub sequence_order: i32,
    pub has_shelter: bool,
    pub is_accessible: bool,
    pub zone: Option<String>,
    pub is_active: bool,
}

/// Sequence order for a stop appended after `existing`
pub fn next_sequence_order(existing: &[Stop]) -> i32 {
    existing
        .iter()
        .map(|s| s.sequence_order)
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(order: i32) -> Stop {
        Stop {
            id: i64::from(order),
            route_id: 1,
            stop_name: format!("Stop {}", order),
            stop_code: None,
            latitude: 0.0,
            longitude: 0.0,
            sequence_order: order,
            has_shelter: false,
            is_accessible: false,
            zone: None,
            is_active: true,
        }
    }

    #[test]
    fn appended_stops_follow_the_highest_order() {
        assert_eq!(next_sequence_order(&[]), 1);
        assert_eq!(next_sequence_order(&[stop(1), stop(4), stop(2)]), 5);
    }
}

//! Vehicle domain entities

use chrono::{DateTime, Duration, Utc};

use crate::domain::{DomainError, DomainResult};

const EARTH_RADIUS_KM: f64 = 6371.0;

crate::wire_enum! {
    pub enum VehicleStatus("vehicle status") {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        InTransit => "IN_TRANSIT",
        Maintenance => "MAINTENANCE",
        Breakdown => "BREAKDOWN",
        OutOfService => "OUT_OF_SERVICE",
    }
}

crate::wire_enum! {
    pub enum FuelType("fuel type") {
        Gasoline => "GASOLINE",
        Diesel => "DIESEL",
        Electric => "ELECTRIC",
        Hybrid => "HYBRID",
        Cng => "CNG",
        Lpg => "LPG",
        Hydrogen => "HYDROGEN",
    }
}

/// Days between scheduled maintenance visits
pub const MAINTENANCE_INTERVAL_DAYS: i64 = 90;

/// A fleet vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i64,
    pub vehicle_number: String,
    pub license_plate: String,
    pub capacity: i32,
    pub vehicle_type: Option<String>,
    pub is_accessible: bool,
    pub status: VehicleStatus,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: Option<FuelType>,
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

impl Vehicle {
    pub fn new(
        vehicle_number: impl Into<String>,
        license_plate: impl Into<String>,
        capacity: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            vehicle_number: vehicle_number.into(),
            license_plate: license_plate.into(),
            capacity,
            vehicle_type: None,
            is_accessible: false,
            status: VehicleStatus::Inactive,
            manufacturer: None,
            model: None,
            year: None,
            fuel_type: None,
            has_air_conditioning: false,
            has_wifi: false,
            has_gps: false,
            odometer_reading: None,
            last_maintenance: None,
            next_maintenance: None,
            current_passengers: 0,
            route_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Active and with at least one free place
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Active && self.current_passengers < self.capacity
    }

    /// Maintenance falls within `days` of `now` (or is already late)
    pub fn maintenance_due_within(&self, now: DateTime<Utc>, days: i64) -> bool {
        self.next_maintenance
            .is_some_and(|next| next <= now + Duration::days(days))
    }

    fn refuse(&self, action: &str) -> DomainError {
        DomainError::Conflict(format!(
            "Vehicle {} cannot {} while {}{}",
            self.vehicle_number,
            action,
            self.status,
            if self.is_active { "" } else { " (deactivated)" }
        ))
    }

    /// ACTIVE to IN_TRANSIT
    pub fn start_trip(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_active || self.status != VehicleStatus::Active {
            return Err(self.refuse("start a trip"));
        }
        self.status = VehicleStatus::InTransit;
        self.updated_at = now;
        Ok(())
    }

    /// IN_TRANSIT back to ACTIVE; the vehicle is empty again
    pub fn end_trip(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != VehicleStatus::InTransit {
            return Err(self.refuse("end a trip"));
        }
        self.status = VehicleStatus::Active;
        self.current_passengers = 0;
        self.updated_at = now;
        Ok(())
    }

    /// Put an idle vehicle into service. It must be enabled and not overdue
    /// for maintenance.
    pub fn start_service(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_active
            || !matches!(self.status, VehicleStatus::Inactive | VehicleStatus::Active)
        {
            return Err(self.refuse("enter service"));
        }
        if self.next_maintenance.is_some_and(|next| next <= now) {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} is overdue for maintenance",
                self.vehicle_number
            )));
        }
        self.status = VehicleStatus::Active;
        self.updated_at = now;
        Ok(())
    }

    /// Take an idle vehicle out of service; a running trip must end first
    pub fn end_service(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !matches!(self.status, VehicleStatus::Inactive | VehicleStatus::Active) {
            return Err(self.refuse("leave service"));
        }
        self.status = VehicleStatus::Inactive;
        self.updated_at = now;
        Ok(())
    }

    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.updated_at = now;
    }

    /// Disable the vehicle; it drops to INACTIVE
    pub fn deactivate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == VehicleStatus::InTransit {
            return Err(self.refuse("be deactivated"));
        }
        self.is_active = false;
        self.status = VehicleStatus::Inactive;
        self.updated_at = now;
        Ok(())
    }

    pub fn complete_maintenance(&mut self, now: DateTime<Utc>) {
        self.last_maintenance = Some(now);
        self.next_maintenance = Some(now + Duration::days(MAINTENANCE_INTERVAL_DAYS));
        self.status = VehicleStatus::Active;
        self.updated_at = now;
    }
}

/// One GPS fix reported for a vehicle
#[derive(Debug, Clone)]
pub struct VehicleLocation {
    pub id: i64,
    pub vehicle_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl VehicleLocation {
    /// Great-circle distance to a point, in kilometres
    pub fn distance_km(&self, lat: f64, lng: f64) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (lng - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_requires_active_and_free_seats() {
        let mut v = Vehicle::new("V-001", "KN-1234-AB", 2);
        assert!(!v.is_available());
        v.status = VehicleStatus::Active;
        assert!(v.is_available());
        v.current_passengers = 2;
        assert!(!v.is_available());
    }

    #[test]
    fn completing_maintenance_schedules_next_visit() {
        let now = Utc::now();
        let mut v = Vehicle::new("V-002", "KN-5678-CD", 50);
        v.status = VehicleStatus::Maintenance;
        v.complete_maintenance(now);
        assert_eq!(v.status, VehicleStatus::Active);
        assert_eq!(v.next_maintenance, Some(now + Duration::days(90)));
        assert!(!v.maintenance_due_within(now, 7));
        assert!(v.maintenance_due_within(now, 90));
    }

    #[test]
    fn trips_run_between_active_and_in_transit() {
        let now = Utc::now();
        let mut v = Vehicle::new("V-003", "KN-0003", 40);
        assert!(matches!(v.start_trip(now), Err(DomainError::Conflict(_))));

        v.start_service(now).unwrap();
        v.current_passengers = 12;
        v.start_trip(now).unwrap();
        assert_eq!(v.status, VehicleStatus::InTransit);
        assert!(matches!(v.end_service(now), Err(DomainError::Conflict(_))));
        assert!(matches!(v.deactivate(now), Err(DomainError::Conflict(_))));

        v.end_trip(now).unwrap();
        assert_eq!(v.status, VehicleStatus::Active);
        assert_eq!(v.current_passengers, 0);
        assert!(matches!(v.end_trip(now), Err(DomainError::Conflict(_))));

        v.end_service(now).unwrap();
        assert_eq!(v.status, VehicleStatus::Inactive);
    }

    #[test]
    fn service_needs_an_enabled_roadworthy_vehicle() {
        let now = Utc::now();
        let mut v = Vehicle::new("V-004", "KN-0004", 40);

        v.deactivate(now).unwrap();
        assert!(!v.is_active);
        assert!(matches!(v.start_service(now), Err(DomainError::Conflict(_))));
        v.activate(now);
        assert_eq!(v.status, VehicleStatus::Inactive);

        v.next_maintenance = Some(now - Duration::days(1));
        assert!(matches!(v.start_service(now), Err(DomainError::Conflict(_))));
        v.complete_maintenance(now);
        v.end_service(now).unwrap();
        v.start_service(now).unwrap();
        assert_eq!(v.status, VehicleStatus::Active);

        v.status = VehicleStatus::Breakdown;
        assert!(matches!(v.start_service(now), Err(DomainError::Conflict(_))));
        assert!(matches!(v.end_service(now), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn haversine_distance() {
        let fix = VehicleLocation {
            id: 1,
            vehicle_id: 1,
            latitude: -4.3217,
            longitude: 15.3125,
            speed: None,
            heading: None,
            recorded_at: Utc::now(),
        };
        assert!(fix.distance_km(-4.3217, 15.3125) < 1e-9);
        // One degree of latitude is about 111.2 km
        let d = fix.distance_km(-3.3217, 15.3125);
        assert!((d - 111.19).abs() < 0.1, "{}", d);
    }
}

//! Vehicle registry, route assignment, maintenance and GPS history

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::vehicle::{FuelType, Vehicle, VehicleLocation, VehicleStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{minutes_before, non_blank, parse_datetime};

/// Days ahead that count as "maintenance due"
pub const MAINTENANCE_DUE_DAYS: i64 = 7;
const LOCATION_HISTORY_LIMIT: u64 = 100;
pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_MINUTES_BACK: i64 = 60;

/// Create or partial-update payload. On create `vehicle_number`,
/// `license_plate` and `capacity` are required.
#[derive(Debug, Clone, Default)]
pub struct VehicleInput {
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

#[derive(Debug, Clone, Copy)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetStatistics {
    pub total_vehicles: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub average_capacity: f64,
    pub total_capacity: i64,
    pub active_vehicles: usize,
}

impl FleetStatistics {
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        let mut by_status = BTreeMap::new();
        let mut by_type = BTreeMap::new();
        for v in vehicles {
            *by_status.entry(v.status.to_string()).or_insert(0) += 1;
            let kind = v.vehicle_type.clone().unwrap_or_else(|| "UNKNOWN".to_string());
            *by_type.entry(kind).or_insert(0) += 1;
        }

        let total_capacity: i64 = vehicles.iter().map(|v| i64::from(v.capacity)).sum();
        let average_capacity = if vehicles.is_empty() {
            0.0
        } else {
            total_capacity as f64 / vehicles.len() as f64
        };

        Self {
            total_vehicles: vehicles.len(),
            by_status,
            by_type,
            average_capacity,
            total_capacity,
            active_vehicles: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Active)
                .count(),
        }
    }
}

fn validate_coordinates(lat: f64, lng: f64) -> DomainResult<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(DomainError::Validation(format!(
            "Invalid coordinates: {}, {}",
            lat, lng
        )));
    }
    Ok(())
}

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_all().await
    }

    pub async fn by_status(&self, status: &str) -> DomainResult<Vec<Vehicle>> {
        let status = VehicleStatus::parse(status)?;
        self.repos.vehicles().find_by_status(status).await
    }

    pub async fn active(&self) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_by_status(VehicleStatus::Active).await
    }

    pub async fn available(&self) -> DomainResult<Vec<Vehicle>> {
        Ok(self
            .active()
            .await?
            .into_iter()
            .filter(Vehicle::is_available)
            .collect())
    }

    pub async fn by_number(&self, vehicle_number: &str) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_number(vehicle_number.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "vehicleNumber", vehicle_number))
    }

    pub async fn by_plate(&self, license_plate: &str) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_plate(license_plate.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "licensePlate", license_plate))
    }

    pub async fn by_route(&self, route_id: i64) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_by_route(route_id).await
    }

    pub async fn maintenance_due(&self) -> DomainResult<Vec<Vehicle>> {
        let now = Utc::now();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|v| v.maintenance_due_within(now, MAINTENANCE_DUE_DAYS))
            .collect())
    }

    pub async fn statistics(&self) -> DomainResult<FleetStatistics> {
        Ok(FleetStatistics::from_vehicles(&self.list().await?))
    }

    async fn ensure_unique(&self, vehicle: &Vehicle) -> DomainResult<()> {
        if let Some(other) = self
            .repos
            .vehicles()
            .find_by_number(&vehicle.vehicle_number)
            .await?
        {
            if other.id != vehicle.id {
                return Err(DomainError::Conflict(format!(
                    "Vehicle number already exists: {}",
                    vehicle.vehicle_number
                )));
            }
        }
        if let Some(other) = self
            .repos
            .vehicles()
            .find_by_plate(&vehicle.license_plate)
            .await?
        {
            if other.id != vehicle.id {
                return Err(DomainError::Conflict(format!(
                    "License plate already exists: {}",
                    vehicle.license_plate
                )));
            }
        }
        Ok(())
    }

    fn apply(vehicle: &mut Vehicle, input: VehicleInput) -> DomainResult<()> {
        if let Some(v) = non_blank(input.vehicle_number.as_deref()) {
            vehicle.vehicle_number = v.to_string();
        }
        if let Some(v) = non_blank(input.license_plate.as_deref()) {
            vehicle.license_plate = v.to_string();
        }
        if let Some(c) = input.capacity {
            if c <= 0 {
                return Err(DomainError::Validation("Capacity must be positive".into()));
            }
            vehicle.capacity = c;
        }
        if let Some(v) = input.vehicle_type {
            vehicle.vehicle_type = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = non_blank(input.status.as_deref()) {
            vehicle.status = VehicleStatus::parse(v)?;
        }
        if let Some(v) = non_blank(input.fuel_type.as_deref()) {
            vehicle.fuel_type = Some(FuelType::parse(v)?);
        }
        if let Some(v) = input.manufacturer {
            vehicle.manufacturer = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = input.model {
            vehicle.model = non_blank(Some(&v)).map(str::to_string);
        }
        if input.year.is_some() {
            vehicle.year = input.year;
        }
        if input.odometer_reading.is_some() {
            vehicle.odometer_reading = input.odometer_reading;
        }
        if let Some(v) = input.next_maintenance.as_deref().and_then(parse_datetime) {
            vehicle.next_maintenance = Some(v);
        }
        if let Some(p) = input.current_passengers {
            if p < 0 {
                return Err(DomainError::Validation(
                    "Current passengers cannot be negative".into(),
                ));
            }
            vehicle.current_passengers = p;
        }
        if input.route_id.is_some() {
            vehicle.route_id = input.route_id;
        }
        if let Some(v) = input.is_accessible {
            vehicle.is_accessible = v;
        }
        if let Some(v) = input.has_air_conditioning {
            vehicle.has_air_conditioning = v;
        }
        if let Some(v) = input.has_wifi {
            vehicle.has_wifi = v;
        }
        if let Some(v) = input.has_gps {
            vehicle.has_gps = v;
        }
        if let Some(v) = input.is_active {
            vehicle.is_active = v;
        }
        Ok(())
    }

    pub async fn create(&self, input: VehicleInput) -> DomainResult<Vehicle> {
        let number = non_blank(input.vehicle_number.as_deref())
            .ok_or_else(|| DomainError::Validation("Vehicle number is required".into()))?;
        let plate = non_blank(input.license_plate.as_deref())
            .ok_or_else(|| DomainError::Validation("License plate is required".into()))?;
        let capacity = input
            .capacity
            .ok_or_else(|| DomainError::Validation("Capacity is required".into()))?;

        let mut vehicle = Vehicle::new(number, plate, capacity);
        Self::apply(&mut vehicle, input)?;
        self.ensure_unique(&vehicle).await?;

        let vehicle = self.repos.vehicles().create(vehicle).await?;
        info!(vehicle_id = vehicle.id, number = %vehicle.vehicle_number, "🚌 Vehicle registered");
        Ok(vehicle)
    }

    pub async fn update(&self, id: i64, input: VehicleInput) -> DomainResult<Vehicle> {
        let mut vehicle = self.get(id).await?;
        Self::apply(&mut vehicle, input)?;
        self.ensure_unique(&vehicle).await?;
        vehicle.updated_at = Utc::now();
        self.repos.vehicles().update(vehicle).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.vehicles().delete(id).await
    }

    async fn save_with_status(&self, id: i64, status: VehicleStatus) -> DomainResult<Vehicle> {
        let mut vehicle = self.get(id).await?;
        let old = vehicle.status;
        vehicle.status = status;
        vehicle.updated_at = Utc::now();
        let vehicle = self.repos.vehicles().update(vehicle).await?;
        info!(vehicle_id = id, from = %old, to = %status, "Vehicle status changed");
        Ok(vehicle)
    }

    pub async fn update_status(&self, id: i64, status: &str) -> DomainResult<Vehicle> {
        let status = VehicleStatus::parse(status)?;
        self.save_with_status(id, status).await
    }

    pub async fn report_breakdown(&self, id: i64) -> DomainResult<Vehicle> {
        self.save_with_status(id, VehicleStatus::Breakdown).await
    }

    pub async fn resolve_breakdown(&self, id: i64) -> DomainResult<Vehicle> {
        self.save_with_status(id, VehicleStatus::Active).await
    }

    // ── Lifecycle ─────────────────────────────────────────────

    async fn transition<F>(&self, id: i64, action: &'static str, f: F) -> DomainResult<Vehicle>
    where
        F: FnOnce(&mut Vehicle, DateTime<Utc>) -> DomainResult<()>,
    {
        let mut vehicle = self.get(id).await?;
        let old = vehicle.status;
        f(&mut vehicle, Utc::now())?;
        let vehicle = self.repos.vehicles().update(vehicle).await?;
        info!(vehicle_id = id, action, from = %old, to = %vehicle.status, is_active = vehicle.is_active, "Vehicle lifecycle");
        Ok(vehicle)
    }

    pub async fn start_trip(&self, id: i64) -> DomainResult<Vehicle> {
        self.transition(id, "start_trip", Vehicle::start_trip).await
    }

    pub async fn end_trip(&self, id: i64) -> DomainResult<Vehicle> {
        self.transition(id, "end_trip", Vehicle::end_trip).await
    }

    pub async fn start_service(&self, id: i64) -> DomainResult<Vehicle> {
        self.transition(id, "start_service", Vehicle::start_service).await
    }

    pub async fn end_service(&self, id: i64) -> DomainResult<Vehicle> {
        self.transition(id, "end_service", Vehicle::end_service).await
    }

    pub async fn activate(&self, id: i64) -> DomainResult<Vehicle> {
        self.transition(id, "activate", |v, now| {
            v.activate(now);
            Ok(())
        })
        .await
    }

    pub async fn deactivate(&self, id: i64) -> DomainResult<Vehicle> {
        self.transition(id, "deactivate", Vehicle::deactivate).await
    }

    pub async fn complete_maintenance(&self, id: i64) -> DomainResult<Vehicle> {
        let mut vehicle = self.get(id).await?;
        vehicle.complete_maintenance(Utc::now());
        self.repos.vehicles().update(vehicle).await
    }

    pub async fn assign_route(&self, vehicle_id: i64, route_id: i64) -> DomainResult<Vehicle> {
        let mut vehicle = self.get(vehicle_id).await?;
        self.repos
            .routes()
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Route", "id", route_id))?;
        vehicle.route_id = Some(route_id);
        vehicle.updated_at = Utc::now();
        self.repos.vehicles().update(vehicle).await
    }

    pub async fn unassign_route(&self, vehicle_id: i64) -> DomainResult<Vehicle> {
        let mut vehicle = self.get(vehicle_id).await?;
        vehicle.route_id = None;
        vehicle.updated_at = Utc::now();
        self.repos.vehicles().update(vehicle).await
    }

    // ── GPS ───────────────────────────────────────────────────

    pub async fn record_location(&self, vehicle_id: i64, fix: LocationFix) -> DomainResult<VehicleLocation> {
        validate_coordinates(fix.latitude, fix.longitude)?;
        self.get(vehicle_id).await?;
        self.repos
            .vehicle_locations()
            .record(VehicleLocation {
                id: 0,
                vehicle_id,
                latitude: fix.latitude,
                longitude: fix.longitude,
                speed: fix.speed,
                heading: fix.heading,
                recorded_at: Utc::now(),
            })
            .await
    }

    pub async fn latest_location(&self, vehicle_id: i64) -> DomainResult<Option<VehicleLocation>> {
        self.get(vehicle_id).await?;
        self.repos.vehicle_locations().latest(vehicle_id).await
    }

    /// Vehicles whose latest fix from the last `minutes_back` minutes lies
    /// within `radius_km` of the point, nearest first.
    pub async fn in_radius(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        minutes_back: i64,
    ) -> DomainResult<Vec<Vehicle>> {
        validate_coordinates(lat, lng)?;
        if radius_km <= 0.0 || !radius_km.is_finite() {
            return Err(DomainError::Validation(format!("Invalid radius: {}", radius_km)));
        }
        if minutes_back <= 0 {
            return Err(DomainError::Validation("minutesBack must be positive".into()));
        }
        let since = minutes_before(Utc::now(), minutes_back).ok_or_else(|| {
            DomainError::Validation(format!("minutesBack out of range: {}", minutes_back))
        })?;

        // Newest first, so the first fix seen per vehicle is its current one
        let mut latest: BTreeMap<i64, f64> = BTreeMap::new();
        for fix in self.repos.vehicle_locations().find_since(since).await? {
            if !latest.contains_key(&fix.vehicle_id) {
                latest.insert(fix.vehicle_id, fix.distance_km(lat, lng));
            }
        }

        let mut nearby = Vec::new();
        for (vehicle_id, distance) in latest.into_iter().filter(|(_, d)| *d <= radius_km) {
            if let Some(vehicle) = self.repos.vehicles().find_by_id(vehicle_id).await? {
                nearby.push((distance, vehicle));
            }
        }
        nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(nearby.into_iter().map(|(_, v)| v).collect())
    }

    pub async fn location_history(&self, vehicle_id: i64) -> DomainResult<Vec<VehicleLocation>> {
        self.get(vehicle_id).await?;
        self.repos
            .vehicle_locations()
            .history(vehicle_id, LOCATION_HISTORY_LIMIT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::{Route, RouteType};
    use crate::test_support::repositories;
    use chrono::Duration;

    fn input(number: &str, plate: &str) -> VehicleInput {
        VehicleInput {
            vehicle_number: Some(number.into()),
            license_plate: Some(plate.into()),
            capacity: Some(50),
            vehicle_type: Some("BUS".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn registration_enforces_unique_number_and_plate() {
        let svc = VehicleService::new(repositories().await);

        let v = svc.create(input("V-001", "KN-1234")).await.unwrap();
        assert_eq!(v.status, VehicleStatus::Inactive);

        assert!(matches!(
            svc.create(input("V-001", "KN-9999")).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            svc.create(input("V-002", "KN-1234")).await,
            Err(DomainError::Conflict(_))
        ));

        let other = svc.create(input("V-002", "KN-2222")).await.unwrap();
        assert!(matches!(
            svc.update(other.id, VehicleInput {
                license_plate: Some("KN-1234".into()),
                ..Default::default()
            })
            .await,
            Err(DomainError::Conflict(_))
        ));
        // Re-saving its own values is fine
        svc.update(v.id, input("V-001", "KN-1234")).await.unwrap();
    }

    #[tokio::test]
    async fn status_and_availability() {
        let svc = VehicleService::new(repositories().await);
        let v = svc.create(input("V-010", "KN-0010")).await.unwrap();

        assert!(matches!(
            svc.update_status(v.id, "FLYING").await,
            Err(DomainError::Validation(_))
        ));
        svc.update_status(v.id, "active").await.unwrap();
        assert_eq!(svc.available().await.unwrap().len(), 1);

        svc.update(v.id, VehicleInput { current_passengers: Some(50), ..Default::default() })
            .await
            .unwrap();
        assert!(svc.available().await.unwrap().is_empty());
        assert_eq!(svc.active().await.unwrap().len(), 1);

        let broken = svc.report_breakdown(v.id).await.unwrap();
        assert_eq!(broken.status, VehicleStatus::Breakdown);
        let fixed = svc.resolve_breakdown(v.id).await.unwrap();
        assert_eq!(fixed.status, VehicleStatus::Active);
    }

    #[tokio::test]
    async fn maintenance_window() {
        let svc = VehicleService::new(repositories().await);
        let soon = svc
            .create(VehicleInput {
                next_maintenance: Some((Utc::now() + Duration::days(3)).to_rfc3339()),
                ..input("V-020", "KN-0020")
            })
            .await
            .unwrap();
        svc.create(VehicleInput {
            next_maintenance: Some((Utc::now() + Duration::days(30)).to_rfc3339()),
            ..input("V-021", "KN-0021")
        })
        .await
        .unwrap();

        let due = svc.maintenance_due().await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, soon.id);

        let serviced = svc.complete_maintenance(soon.id).await.unwrap();
        assert_eq!(serviced.status, VehicleStatus::Active);
        assert!(serviced.next_maintenance.unwrap() > Utc::now() + Duration::days(89));
        assert!(svc.maintenance_due().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn routes_and_locations() {
        let repos = repositories().await;
        let svc = VehicleService::new(repos.clone());
        let v = svc.create(input("V-030", "KN-0030")).await.unwrap();

        assert!(matches!(
            svc.assign_route(v.id, 77).await,
            Err(DomainError::NotFound { .. })
        ));
        let route = repos
            .routes()
            .create(Route::new("Ligne 1", "L1", RouteType::Urban))
            .await
            .unwrap();
        svc.assign_route(v.id, route.id).await.unwrap();
        assert_eq!(svc.by_route(route.id).await.unwrap().len(), 1);
        let v = svc.unassign_route(v.id).await.unwrap();
        assert_eq!(v.route_id, None);

        assert!(svc.latest_location(v.id).await.unwrap().is_none());
        assert!(matches!(
            svc.record_location(v.id, LocationFix { latitude: 95.0, longitude: 15.3, speed: None, heading: None }).await,
            Err(DomainError::Validation(_))
        ));
        for lat in [-4.30, -4.31] {
            svc.record_location(v.id, LocationFix { latitude: lat, longitude: 15.3, speed: Some(30.0), heading: None })
                .await
                .unwrap();
        }
        assert_eq!(svc.location_history(v.id).await.unwrap().len(), 2);
        assert!(svc.latest_location(v.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn lookups_by_number_and_plate() {
        let svc = VehicleService::new(repositories().await);
        let v = svc.create(input("V-040", "KN-0040")).await.unwrap();
        assert_eq!(svc.by_number("V-040").await.unwrap().id, v.id);
        assert_eq!(svc.by_plate(" KN-0040 ").await.unwrap().id, v.id);
        assert!(matches!(svc.by_number("V-999").await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.by_plate("XX-0000").await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn service_and_trip_lifecycle() {
        let svc = VehicleService::new(repositories().await);
        let v = svc.create(input("V-050", "KN-0050")).await.unwrap();

        assert!(matches!(svc.start_trip(v.id).await, Err(DomainError::Conflict(_))));
        assert_eq!(svc.start_service(v.id).await.unwrap().status, VehicleStatus::Active);
        assert_eq!(svc.start_trip(v.id).await.unwrap().status, VehicleStatus::InTransit);
        assert!(matches!(svc.end_service(v.id).await, Err(DomainError::Conflict(_))));
        assert!(matches!(svc.deactivate(v.id).await, Err(DomainError::Conflict(_))));
        assert_eq!(svc.end_trip(v.id).await.unwrap().status, VehicleStatus::Active);
        assert_eq!(svc.end_service(v.id).await.unwrap().status, VehicleStatus::Inactive);

        let off = svc.deactivate(v.id).await.unwrap();
        assert!(!off.is_active);
        assert!(matches!(svc.start_service(v.id).await, Err(DomainError::Conflict(_))));
        let on = svc.activate(v.id).await.unwrap();
        assert!(on.is_active);
        assert_eq!(on.status, VehicleStatus::Inactive);

        let stored = svc.get(v.id).await.unwrap();
        assert!(stored.is_active);
        assert!(matches!(svc.start_trip(4242).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn vehicles_in_radius_use_their_latest_recent_fix() {
        let svc = VehicleService::new(repositories().await);
        let near = svc.create(input("V-060", "KN-0060")).await.unwrap();
        let moved_away = svc.create(input("V-061", "KN-0061")).await.unwrap();
        let far = svc.create(input("V-062", "KN-0062")).await.unwrap();
        svc.create(input("V-063", "KN-0063")).await.unwrap();

        let fix = |latitude: f64, longitude: f64| LocationFix { latitude, longitude, speed: None, heading: None };
        svc.record_location(near.id, fix(-4.3220, 15.3130)).await.unwrap();
        svc.record_location(moved_away.id, fix(-4.3217, 15.3125)).await.unwrap();
        svc.record_location(moved_away.id, fix(-4.9000, 15.3125)).await.unwrap();
        svc.record_location(far.id, fix(-5.8000, 15.3125)).await.unwrap();

        let found = svc.in_radius(-4.3217, 15.3125, 5.0, 60).await.unwrap();
        assert_eq!(found.iter().map(|v| v.id).collect::<Vec<_>>(), vec![near.id]);

        let wide = svc.in_radius(-4.3217, 15.3125, 100.0, 60).await.unwrap();
        assert_eq!(wide.iter().map(|v| v.id).collect::<Vec<_>>(), vec![near.id, moved_away.id]);

        assert!(matches!(svc.in_radius(-4.3, 15.3, 0.0, 60).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.in_radius(-4.3, 15.3, 5.0, 0).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.in_radius(-4.3, 15.3, 5.0, i64::MAX).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.in_radius(91.0, 15.3, 5.0, 60).await, Err(DomainError::Validation(_))));
    }

    #[test]
    fn fleet_statistics() {
        let mut a = Vehicle::new("A", "PA", 40);
        a.status = VehicleStatus::Active;
        a.vehicle_type = Some("BUS".into());
        let b = Vehicle::new("B", "PB", 20);

        let stats = FleetStatistics::from_vehicles(&[a, b]);
        assert_eq!(stats.total_vehicles, 2);
        assert_eq!(stats.total_capacity, 60);
        assert_eq!(stats.average_capacity, 30.0);
        assert_eq!(stats.active_vehicles, 1);
        assert_eq!(stats.by_type["UNKNOWN"], 1);
        assert_eq!(stats.by_status["INACTIVE"], 1);

        let empty = FleetStatistics::from_vehicles(&[]);
        assert_eq!(empty.average_capacity, 0.0);
    }
}

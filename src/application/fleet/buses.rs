//! Buses on the live map: registry, driver lookup, position and accidents

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::events::{BusLocationEvent, Event, SharedEventBus};
use crate::domain::bus::Bus;
use crate::domain::staff::StaffRole;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{non_blank, parse_datetime};

#[derive(Debug, Clone, Default)]
pub struct BusInput {
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

pub struct BusService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl BusService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Bus> {
        self.repos
            .buses()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bus", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Bus>> {
        self.repos.buses().find_all().await
    }

    pub async fn by_driver(&self, driver_id: i64) -> DomainResult<Vec<Bus>> {
        self.repos.buses().find_by_driver(driver_id).await
    }

    async fn check_references(&self, bus: &Bus) -> DomainResult<()> {
        if let Some(driver_id) = bus.driver_id {
            let driver = self
                .repos
                .staff()
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| DomainError::Validation(format!("Driver not found: {}", driver_id)))?;
            if driver.role != StaffRole::Driver {
                return Err(DomainError::Validation(format!(
                    "Staff {} is not a driver",
                    driver_id
                )));
            }
        }
        if let Some(route_id) = bus.route_id {
            if self.repos.routes().find_by_id(route_id).await?.is_none() {
                return Err(DomainError::Validation(format!("Route not found: {}", route_id)));
            }
        }
        Ok(())
    }

    fn apply(bus: &mut Bus, input: BusInput) -> DomainResult<()> {
        if let Some(v) = non_blank(input.name.as_deref()) {
            bus.name = v.to_string();
        }
        if let Some(v) = input.bus_line {
            bus.bus_line = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(c) = input.capacity {
            if c <= 0 {
                return Err(DomainError::Validation("Capacity must be positive".into()));
            }
            bus.capacity = c;
        }
        bus.start_lat = input.start_lat.or(bus.start_lat);
        bus.start_lng = input.start_lng.or(bus.start_lng);
        bus.end_lat = input.end_lat.or(bus.end_lat);
        bus.end_lng = input.end_lng.or(bus.end_lng);
        if let Some(v) = input.departure_time.as_deref().and_then(parse_datetime) {
            bus.departure_time = Some(v);
        }
        if let Some(v) = input.arrival_time.as_deref().and_then(parse_datetime) {
            bus.arrival_time = Some(v);
        }
        if input.driver_id.is_some() {
            bus.driver_id = input.driver_id;
        }
        if input.route_id.is_some() {
            bus.route_id = input.route_id;
        }
        Ok(())
    }

    pub async fn create(&self, input: BusInput) -> DomainResult<Bus> {
        let name = non_blank(input.name.as_deref())
            .ok_or_else(|| DomainError::Validation("Bus name is required".into()))?;
        let capacity = input
            .capacity
            .ok_or_else(|| DomainError::Validation("Capacity is required".into()))?;

        let mut bus = Bus::new(name, capacity);
        Self::apply(&mut bus, input)?;
        self.check_references(&bus).await?;

        let bus = self.repos.buses().create(bus).await?;
        info!(bus_id = bus.id, name = %bus.name, "🚌 Bus created");
        Ok(bus)
    }

    pub async fn update(&self, id: i64, input: BusInput) -> DomainResult<Bus> {
        let mut bus = self.get(id).await?;
        Self::apply(&mut bus, input)?;
        self.check_references(&bus).await?;
        self.repos.buses().update(bus).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.buses().delete(id).await
    }

    pub async fn update_location(
        &self,
        id: i64,
        lat: f64,
        lng: f64,
        progress: Option<f64>,
    ) -> DomainResult<Bus> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::Validation(format!(
                "Invalid coordinates: {}, {}",
                lat, lng
            )));
        }
        let mut bus = self.get(id).await?;
        bus.update_location(lat, lng, progress);
        let bus = self.repos.buses().update(bus).await?;

        self.event_bus
            .publish(Event::BusLocationUpdated(BusLocationEvent {
                bus_id: bus.id,
                latitude: lat,
                longitude: lng,
                progress: bus.progress,
            }));
        Ok(bus)
    }

    /// Flag or clear an accident. A flagged bus stops and sells no tickets.
    pub async fn set_accident(&self, id: i64, has_accident: bool) -> DomainResult<Bus> {
        let mut bus = self.get(id).await?;
        bus.has_accident = has_accident;
        if has_accident {
            bus.is_stopped = true;
            warn!(bus_id = id, "Accident reported on bus");
        }
        self.repos.buses().update(bus).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::test_support::{repositories, seed_staff};

    fn input(name: &str) -> BusInput {
        BusInput {
            name: Some(name.into()),
            capacity: Some(40),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_checks_driver_role() {
        let repos = repositories().await;
        let svc = BusService::new(repos.clone(), Arc::new(EventBus::new()));
        let driver = seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let tech = seed_staff(repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;

        assert!(matches!(
            svc.create(BusInput { driver_id: Some(tech.id), ..input("B-1") }).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create(BusInput { capacity: Some(0), ..input("B-1") }).await,
            Err(DomainError::Validation(_))
        ));

        let bus = svc
            .create(BusInput { driver_id: Some(driver.id), ..input("B-1") })
            .await
            .unwrap();
        assert_eq!(svc.by_driver(driver.id).await.unwrap()[0].id, bus.id);

        let renamed = svc
            .update(bus.id, BusInput { name: Some("B-1 Express".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(renamed.name, "B-1 Express");
        assert_eq!(renamed.driver_id, Some(driver.id));

        svc.delete(bus.id).await.unwrap();
        assert!(matches!(svc.get(bus.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn location_updates_are_broadcast() {
        let repos = repositories().await;
        let events = Arc::new(EventBus::new());
        let svc = BusService::new(repos, events.clone());
        let bus = svc.create(input("B-2")).await.unwrap();
        let mut sub = events.subscribe();

        assert!(svc.update_location(bus.id, 120.0, 0.0, None).await.is_err());
        let moved = svc.update_location(bus.id, -4.32, 15.31, Some(0.4)).await.unwrap();
        assert_eq!(moved.current_lat, Some(-4.32));

        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.event.event_type(), "bus_location_updated");

        let crashed = svc.set_accident(bus.id, true).await.unwrap();
        assert!(crashed.has_accident && crashed.is_stopped);
        assert!(!svc.set_accident(bus.id, false).await.unwrap().has_accident);
    }
}

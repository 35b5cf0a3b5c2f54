//! Vehicle repository interfaces

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Vehicle, VehicleLocation, VehicleStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>>;
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;
    async fn find_by_status(&self, status: VehicleStatus) -> DomainResult<Vec<Vehicle>>;
    async fn find_by_route(&self, route_id: i64) -> DomainResult<Vec<Vehicle>>;
    async fn find_by_number(&self, vehicle_number: &str) -> DomainResult<Option<Vehicle>>;
    async fn find_by_plate(&self, license_plate: &str) -> DomainResult<Option<Vehicle>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn create(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;
    async fn update(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

#[async_trait]
pub trait VehicleLocationRepository: Send + Sync {
    async fn record(&self, location: VehicleLocation) -> DomainResult<VehicleLocation>;
    async fn latest(&self, vehicle_id: i64) -> DomainResult<Option<VehicleLocation>>;
    /// Newest first
    async fn history(&self, vehicle_id: i64, limit: u64) -> DomainResult<Vec<VehicleLocation>>;
    /// Fixes of every vehicle recorded at or after `since`, newest first
    async fn find_since(&self, since: DateTime<Utc>) -> DomainResult<Vec<VehicleLocation>>;
}

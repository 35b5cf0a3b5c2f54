//! Bus repository interface

use async_trait::async_trait;

use super::model::Bus;
use crate::domain::DomainResult;

#[async_trait]
pub trait BusRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Bus>>;
    async fn find_all(&self) -> DomainResult<Vec<Bus>>;
    async fn find_by_driver(&self, driver_id: i64) -> DomainResult<Vec<Bus>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn create(&self, bus: Bus) -> DomainResult<Bus>;
    async fn update(&self, bus: Bus) -> DomainResult<Bus>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

//! Schedule repository interface

use async_trait::async_trait;

use super::model::{DayOfWeek, Schedule};
use crate::domain::DomainResult;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Schedule>>;
    async fn find_all(&self) -> DomainResult<Vec<Schedule>>;
    async fn find_by_bus(&self, bus_id: i64) -> DomainResult<Vec<Schedule>>;
    async fn find_by_day(&self, day: DayOfWeek) -> DomainResult<Vec<Schedule>>;
    async fn create(&self, schedule: Schedule) -> DomainResult<Schedule>;
    async fn update(&self, schedule: Schedule) -> DomainResult<Schedule>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

//! Traffic data repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{TrafficData, TrafficQuery};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait TrafficDataRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<TrafficData>>;
    /// Newest first
    async fn find_page(&self, page: u64, limit: u64) -> DomainResult<PaginatedResult<TrafficData>>;
    /// Newest first, inside the square of half-side `radius` around the point
    async fn find_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius: f64,
        limit: u64,
    ) -> DomainResult<Vec<TrafficData>>;
    /// Newest first
    async fn search(&self, query: &TrafficQuery) -> DomainResult<Vec<TrafficData>>;
    async fn find_since(&self, since: DateTime<Utc>) -> DomainResult<Vec<TrafficData>>;
    async fn create(&self, data: TrafficData) -> DomainResult<TrafficData>;
    async fn update(&self, data: TrafficData) -> DomainResult<TrafficData>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
    /// Remove rows observed before `cutoff`; returns the number removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> DomainResult<u64>;
}

//! Route repository interfaces

use async_trait::async_trait;

use super::model::{Route, Stop};
use crate::domain::DomainResult;

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Route>>;
    async fn find_by_code(&self, route_code: &str) -> DomainResult<Option<Route>>;
    async fn find_all(&self) -> DomainResult<Vec<Route>>;
    async fn create(&self, route: Route) -> DomainResult<Route>;
    async fn update(&self, route: Route) -> DomainResult<Route>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

#[async_trait]
pub trait StopRepository: Send + Sync {
    /// Ordered by sequence
    async fn find_by_route(&self, route_id: i64) -> DomainResult<Vec<Stop>>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Stop>>;
    async fn create(&self, stop: Stop) -> DomainResult<Stop>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

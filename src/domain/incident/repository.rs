//! Incident repository interfaces

use async_trait::async_trait;

use super::model::{Incident, IncidentTask};
use crate::domain::DomainResult;

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Incident>>;
    /// Newest first
    async fn find_all(&self) -> DomainResult<Vec<Incident>>;
    /// Newest first
    async fn find_by_bus(&self, bus_id: i64) -> DomainResult<Vec<Incident>>;
    /// Newest first
    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<Incident>>;
    async fn find_by_technician(&self, technician_id: i64) -> DomainResult<Vec<Incident>>;
    async fn create(&self, incident: Incident) -> DomainResult<Incident>;
    async fn update(&self, incident: Incident) -> DomainResult<Incident>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait IncidentTaskRepository: Send + Sync {
    async fn find_by_incident(&self, incident_id: &str) -> DomainResult<Vec<IncidentTask>>;
    async fn find_by_technician(&self, technician_id: i64) -> DomainResult<Vec<IncidentTask>>;
    async fn create(&self, task: IncidentTask) -> DomainResult<IncidentTask>;
}

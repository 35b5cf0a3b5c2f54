//! Emergency report repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::EmergencyReport;
use crate::domain::DomainResult;

#[async_trait]
pub trait EmergencyReportRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<EmergencyReport>>;
    /// Newest first
    async fn find_all(&self) -> DomainResult<Vec<EmergencyReport>>;
    /// Newest first
    async fn find_by_driver(&self, driver_id: i64) -> DomainResult<Vec<EmergencyReport>>;
    /// Newest first
    async fn find_by_driver_since(
        &self,
        driver_id: i64,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<EmergencyReport>>;
    async fn create(&self, report: EmergencyReport) -> DomainResult<EmergencyReport>;
    async fn update(&self, report: EmergencyReport) -> DomainResult<EmergencyReport>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

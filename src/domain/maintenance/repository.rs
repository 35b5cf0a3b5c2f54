//! Maintenance task repository interface

use async_trait::async_trait;

use super::model::{MaintenancePriority, MaintenanceStatus, MaintenanceTask};
use crate::domain::DomainResult;

#[async_trait]
pub trait MaintenanceTaskRepository: Send + Sync {
    async fn find_by_id(&self, task_id: &str) -> DomainResult<Option<MaintenanceTask>>;
    async fn find_all(&self) -> DomainResult<Vec<MaintenanceTask>>;
    async fn find_by_statuses(
        &self,
        statuses: &[MaintenanceStatus],
    ) -> DomainResult<Vec<MaintenanceTask>>;
    async fn find_by_priority(
        &self,
        priority: MaintenancePriority,
    ) -> DomainResult<Vec<MaintenanceTask>>;
    async fn find_by_technician(&self, technician_id: i64) -> DomainResult<Vec<MaintenanceTask>>;
    async fn find_by_equipment(&self, equipment_id: i64) -> DomainResult<Vec<MaintenanceTask>>;
    async fn exists(&self, task_id: &str) -> DomainResult<bool>;
    async fn create(&self, task: MaintenanceTask) -> DomainResult<MaintenanceTask>;
    async fn update(&self, task: MaintenanceTask) -> DomainResult<MaintenanceTask>;
    async fn delete(&self, task_id: &str) -> DomainResult<()>;
}

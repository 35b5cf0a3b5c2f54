//! Equipment repository interfaces

use async_trait::async_trait;

use super::model::{Equipment, EquipmentStatus, MaintenanceRecord};
use crate::domain::DomainResult;

/// Optional filters; text fields match as case-insensitive substrings
#[derive(Debug, Clone, Default)]
pub struct EquipmentQuery {
    pub name: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
}

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Equipment>>;
    async fn find_by_serial(&self, serial_number: &str) -> DomainResult<Option<Equipment>>;
    async fn find_all(&self) -> DomainResult<Vec<Equipment>>;
    async fn find_by_status(&self, status: EquipmentStatus) -> DomainResult<Vec<Equipment>>;
    async fn search(&self, query: &EquipmentQuery) -> DomainResult<Vec<Equipment>>;
    async fn create(&self, equipment: Equipment) -> DomainResult<Equipment>;
    async fn update(&self, equipment: Equipment) -> DomainResult<Equipment>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

#[async_trait]
pub trait MaintenanceRecordRepository: Send + Sync {
    async fn create(&self, record: MaintenanceRecord) -> DomainResult<MaintenanceRecord>;
    /// Oldest start date first
    async fn find_by_equipment(&self, equipment_id: i64) -> DomainResult<Vec<MaintenanceRecord>>;
}

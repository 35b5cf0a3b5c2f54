//! Staff repository interface

use async_trait::async_trait;

use super::model::{Staff, StaffRole};
use crate::domain::DomainResult;

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Staff>>;
    /// Lookup by normalized email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Staff>>;
    async fn find_all(&self) -> DomainResult<Vec<Staff>>;
    async fn find_by_role(&self, role: StaffRole) -> DomainResult<Vec<Staff>>;
    async fn find_active_by_role(&self, role: StaffRole) -> DomainResult<Vec<Staff>>;
    async fn exists_by_email(&self, email: &str) -> DomainResult<bool>;
    async fn count(&self) -> DomainResult<u64>;
    /// Insert a new row; the `id` of the argument is ignored
    async fn create(&self, staff: Staff) -> DomainResult<Staff>;
    async fn update(&self, staff: Staff) -> DomainResult<Staff>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

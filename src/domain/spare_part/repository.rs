//! Spare part repository interface

use async_trait::async_trait;

use super::model::SparePart;
use crate::domain::DomainResult;

#[async_trait]
pub trait SparePartRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<SparePart>>;
    async fn find_by_part_number(&self, part_number: &str) -> DomainResult<Option<SparePart>>;
    async fn find_all(&self) -> DomainResult<Vec<SparePart>>;
    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<SparePart>>;
    /// Case-insensitive match on name, part number or description
    async fn search(&self, query: &str) -> DomainResult<Vec<SparePart>>;
    async fn create(&self, part: SparePart) -> DomainResult<SparePart>;
    async fn update(&self, part: SparePart) -> DomainResult<SparePart>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

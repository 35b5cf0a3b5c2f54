//! Notification repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Notification;
use crate::domain::DomainResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Notification>>;
    /// Newest first
    async fn find_by_recipient(&self, recipient_id: i64) -> DomainResult<Vec<Notification>>;
    /// Newest first
    async fn find_unread_by_recipient(&self, recipient_id: i64)
        -> DomainResult<Vec<Notification>>;
    async fn count_unread(&self, recipient_id: i64) -> DomainResult<u64>;
    async fn mark_all_read(&self, recipient_id: i64) -> DomainResult<u64>;
    /// Whether a non-duplicate row with this hash, addressed to the same
    /// recipient (or to nobody), exists since `since`
    async fn hash_seen_since(
        &self,
        hash: &str,
        recipient_id: Option<i64>,
        since: DateTime<Utc>,
    ) -> DomainResult<bool>;
    async fn create(&self, notification: Notification) -> DomainResult<Notification>;
    async fn update(&self, notification: Notification) -> DomainResult<Notification>;
}

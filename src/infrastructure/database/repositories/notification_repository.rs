//! SeaORM implementation of NotificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::notification::{Notification, NotificationRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::notification;

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: notification::Model) -> Notification {
    Notification {
        id: m.id,
        message: m.message,
        notification_type: m.notification_type,
        recipient_id: m.recipient_id,
        recipient_type: m.recipient_type,
        is_read: m.is_read,
        content_hash: m.content_hash,
        is_duplicate: m.is_duplicate,
        priority: m.priority,
        timestamp: m.timestamp,
        created_at: m.created_at,
    }
}

fn domain_to_active(n: Notification) -> notification::ActiveModel {
    notification::ActiveModel {
        id: if n.id > 0 { Set(n.id) } else { NotSet },
        message: Set(n.message),
        notification_type: Set(n.notification_type),
        recipient_id: Set(n.recipient_id),
        recipient_type: Set(n.recipient_type),
        is_read: Set(n.is_read),
        content_hash: Set(n.content_hash),
        is_duplicate: Set(n.is_duplicate),
        priority: Set(n.priority),
        timestamp: Set(n.timestamp),
        created_at: Set(n.created_at),
    }
}

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Notification>> {
        let m = notification::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_by_recipient(&self, recipient_id: i64) -> DomainResult<Vec<Notification>> {
        let models = notification::Entity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .order_by_desc(notification::Column::Timestamp)
            .order_by_desc(notification::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_unread_by_recipient(
        &self,
        recipient_id: i64,
    ) -> DomainResult<Vec<Notification>> {
        let models = notification::Entity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .order_by_desc(notification::Column::Timestamp)
            .order_by_desc(notification::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_unread(&self, recipient_id: i64) -> DomainResult<u64> {
        notification::Entity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn mark_all_read(&self, recipient_id: i64) -> DomainResult<u64> {
        let res = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn hash_seen_since(
        &self,
        hash: &str,
        recipient_id: Option<i64>,
        since: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let recipient = match recipient_id {
            Some(id) => notification::Column::RecipientId.eq(id),
            None => notification::Column::RecipientId.is_null(),
        };
        let count = notification::Entity::find()
            .filter(notification::Column::ContentHash.eq(hash))
            .filter(recipient)
            .filter(notification::Column::IsDuplicate.eq(false))
            .filter(notification::Column::Timestamp.gte(since))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create(&self, mut n: Notification) -> DomainResult<Notification> {
        n.id = 0;
        let model = domain_to_active(n)
            .insert(&self.db)
            .await
            .map_err(write_err("Notification"))?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, n: Notification) -> DomainResult<Notification> {
        let model = domain_to_active(n)
            .update(&self.db)
            .await
            .map_err(write_err("Notification"))?;
        Ok(model_to_domain(model))
    }
}

//! Notification service
//!
//! Persists notifications, suppresses repeats of the same message within a
//! short window and pushes fresh ones onto the event bus.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::application::events::{Event, NotificationCreatedEvent, SharedEventBus};
use crate::domain::notification::Notification;
use crate::domain::staff::{Staff, StaffRole};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::sha256_hex;

/// Window in which an identical message counts as a duplicate
pub const DEDUP_WINDOW_MINUTES: i64 = 15;

/// Outcome of a create call
#[derive(Debug, Clone)]
pub enum Delivery {
    Delivered(Notification),
    /// Stored with `is_duplicate = true` and not pushed
    Duplicate(Notification),
}

impl Delivery {
    pub fn notification(&self) -> &Notification {
        match self {
            Delivery::Delivered(n) | Delivery::Duplicate(n) => n,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Delivery::Duplicate(_))
    }
}

/// Collapse runs of whitespace into single spaces
pub fn normalize_message(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn content_hash(message: &str, notification_type: &str) -> String {
    sha256_hex(&format!("{}_{}", normalize_message(message), notification_type))
}

fn cache_key(hash: &str, recipient_id: Option<i64>) -> String {
    match recipient_id {
        Some(id) => format!("{}:{}", hash, id),
        None => hash.to_string(),
    }
}

pub struct NotificationService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
    /// dedup key -> last time a non-duplicate was stored
    recent: DashMap<String, DateTime<Utc>>,
}

impl NotificationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self {
            repos,
            event_bus,
            recent: DashMap::new(),
        }
    }

    pub async fn create(&self, mut notification: Notification) -> DomainResult<Delivery> {
        if notification.message.trim().is_empty() {
            return Err(DomainError::Validation("Message is required".into()));
        }
        if notification.notification_type.trim().is_empty() {
            return Err(DomainError::Validation("Notification type is required".into()));
        }

        let now = Utc::now();
        let hash = content_hash(&notification.message, &notification.notification_type);
        notification.content_hash = Some(hash.clone());
        notification.timestamp = now;
        notification.created_at = now;

        if notification.is_deduplicated()
            && self.seen_recently(&hash, notification.recipient_id, now).await?
        {
            notification.is_duplicate = true;
            let saved = self.repos.notifications().create(notification).await?;
            debug!(id = saved.id, hash = %hash, "Duplicate notification suppressed");
            return Ok(Delivery::Duplicate(saved));
        }

        let saved = self.repos.notifications().create(notification).await?;
        self.recent
            .insert(cache_key(&hash, saved.recipient_id), now);

        self.event_bus
            .publish(Event::NotificationCreated(NotificationCreatedEvent {
                notification_id: saved.id,
                message: saved.message.clone(),
                notification_type: saved.notification_type.clone(),
                recipient_id: saved.recipient_id,
                recipient_type: saved.recipient_type.clone(),
                priority: saved.priority.clone(),
            }));

        debug!(id = saved.id, kind = %saved.notification_type, "Notification created");
        Ok(Delivery::Delivered(saved))
    }

    async fn seen_recently(
        &self,
        hash: &str,
        recipient_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let cutoff = now - Duration::minutes(DEDUP_WINDOW_MINUTES);
        let key = cache_key(hash, recipient_id);

        if let Some(seen) = self.recent.get(&key) {
            if *seen >= cutoff {
                return Ok(true);
            }
        }

        let in_db = self
            .repos
            .notifications()
            .hash_seen_since(hash, recipient_id, cutoff)
            .await?;
        if in_db {
            self.recent.insert(key, now);
        }
        Ok(in_db)
    }

    /// Deliver a message to one staff member. Failures are logged, never
    /// returned.
    pub async fn notify(
        &self,
        recipient_id: i64,
        recipient_type: &str,
        message: &str,
        notification_type: &str,
    ) -> bool {
        let notification =
            Notification::new(message, notification_type).to_recipient(recipient_id, recipient_type);
        match self.create(notification).await {
            Ok(delivery) => !delivery.is_duplicate(),
            Err(e) => {
                warn!(recipient_id, error = %e, "Failed to deliver notification");
                false
            }
        }
    }

    /// One notification per active administrator; returns how many were sent
    pub async fn notify_admins(&self, message: &str, notification_type: &str, priority: &str) -> usize {
        let admins = match self
            .repos
            .staff()
            .find_active_by_role(StaffRole::Admin)
            .await
        {
            Ok(admins) => admins,
            Err(e) => {
                warn!(error = %e, "Could not load administrators for notification");
                return 0;
            }
        };

        let mut sent = 0;
        for admin in admins {
            let notification = Notification::new(message, notification_type)
                .to_recipient(admin.id, StaffRole::Admin.as_str())
                .with_priority(priority);
            match self.create(notification).await {
                Ok(Delivery::Delivered(_)) => sent += 1,
                Ok(Delivery::Duplicate(_)) => {}
                Err(e) => warn!(admin_id = admin.id, error = %e, "Failed to notify administrator"),
            }
        }
        sent
    }

    async fn require_staff(&self, id: i64) -> DomainResult<Staff> {
        self.repos
            .staff()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    async fn require_role(&self, id: i64, role: StaffRole) -> DomainResult<Staff> {
        let staff = self.require_staff(id).await?;
        if staff.role != role {
            return Err(DomainError::Validation(format!(
                "Staff {} is not a {}",
                id,
                role.display_name().to_lowercase()
            )));
        }
        Ok(staff)
    }

    pub async fn for_user(&self, user_id: i64) -> DomainResult<Vec<Notification>> {
        self.require_staff(user_id).await?;
        self.repos.notifications().find_by_recipient(user_id).await
    }

    pub async fn unread_for_user(&self, user_id: i64) -> DomainResult<Vec<Notification>> {
        self.require_staff(user_id).await?;
        self.repos
            .notifications()
            .find_unread_by_recipient(user_id)
            .await
    }

    pub async fn unread_count(&self, user_id: i64) -> DomainResult<u64> {
        self.require_staff(user_id).await?;
        self.repos.notifications().count_unread(user_id).await
    }

    pub async fn mark_all_read(&self, user_id: i64) -> DomainResult<u64> {
        self.require_staff(user_id).await?;
        let updated = self.repos.notifications().mark_all_read(user_id).await?;
        info!(user_id, updated, "Notifications marked as read");
        Ok(updated)
    }

    pub async fn mark_read(&self, id: i64) -> DomainResult<Notification> {
        let mut notification = self
            .repos
            .notifications()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notification", "id", id))?;
        notification.is_read = true;
        self.repos.notifications().update(notification).await
    }

    /// All notifications of a staff member holding `role`
    pub async fn for_role(&self, id: i64, role: StaffRole) -> DomainResult<Vec<Notification>> {
        self.require_role(id, role).await?;
        self.repos.notifications().find_by_recipient(id).await
    }

    pub async fn unread_for_role(&self, id: i64, role: StaffRole) -> DomainResult<Vec<Notification>> {
        self.require_role(id, role).await?;
        self.repos.notifications().find_unread_by_recipient(id).await
    }

    pub async fn mark_all_read_for_role(&self, id: i64, role: StaffRole) -> DomainResult<u64> {
        self.require_role(id, role).await?;
        let updated = self.repos.notifications().mark_all_read(id).await?;
        info!(user_id = id, role = %role, updated, "Notifications marked as read");
        Ok(updated)
    }

    /// Create a notification addressed to a staff member holding `role`
    pub async fn send_to_role(
        &self,
        id: i64,
        role: StaffRole,
        message: &str,
        notification_type: &str,
        priority: Option<&str>,
    ) -> DomainResult<Delivery> {
        let staff = self.require_role(id, role).await?;
        let mut notification =
            Notification::new(message, notification_type).to_recipient(staff.id, role.as_str());
        if let Some(priority) = priority.filter(|p| !p.trim().is_empty()) {
            notification = notification.with_priority(priority.trim().to_uppercase());
        }
        self.create(notification).await
    }

    /// Drop cache entries older than the dedup window
    pub fn purge_cache(&self) -> usize {
        let cutoff = Utc::now() - Duration::minutes(DEDUP_WINDOW_MINUTES);
        let before = self.recent.len();
        self.recent.retain(|_, seen| *seen >= cutoff);
        before - self.recent.len()
    }

    pub fn cached_hashes(&self) -> usize {
        self.recent.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::test_support::{repositories, seed_staff};

    async fn service() -> (NotificationService, Arc<dyn RepositoryProvider>, SharedEventBus) {
        let repos = repositories().await;
        let bus = Arc::new(EventBus::new());
        (NotificationService::new(repos.clone(), bus.clone()), repos, bus)
    }

    #[test]
    fn hash_ignores_whitespace_layout() {
        assert_eq!(normalize_message("  Bus   12\n delayed "), "Bus 12 delayed");
        assert_eq!(
            content_hash("Bus 12  delayed", "info"),
            content_hash(" Bus 12 delayed", "info")
        );
        assert_ne!(content_hash("Bus 12 delayed", "info"), content_hash("Bus 12 delayed", "alert"));
    }

    #[tokio::test]
    async fn repeated_message_is_stored_as_duplicate() {
        let (svc, repos, bus) = service().await;
        let mut sub = bus.subscribe();
        let driver = seed_staff(repos.as_ref(), "driver@imas.cd", StaffRole::Driver).await;

        let first = svc
            .create(Notification::new("Route 4 closed", "info").to_recipient(driver.id, "DRIVER"))
            .await
            .unwrap();
        assert!(!first.is_duplicate());
        assert!(sub.recv().await.is_some());

        let second = svc
            .create(Notification::new("Route  4 closed ", "info").to_recipient(driver.id, "DRIVER"))
            .await
            .unwrap();
        assert!(second.is_duplicate());
        assert!(second.notification().is_duplicate);
        assert_eq!(repos.notifications().find_by_recipient(driver.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn database_is_consulted_when_cache_is_cold() {
        let (svc, repos, _bus) = service().await;
        svc.create(Notification::new("Depot flooded", "alert")).await.unwrap();

        let fresh = NotificationService::new(repos, Arc::new(EventBus::new()));
        assert_eq!(fresh.cached_hashes(), 0);
        let again = fresh.create(Notification::new("Depot flooded", "alert")).await.unwrap();
        assert!(again.is_duplicate());
        assert_eq!(fresh.cached_hashes(), 1);
    }

    #[tokio::test]
    async fn errors_and_accidents_are_never_suppressed() {
        let (svc, _repos, _bus) = service().await;
        for _ in 0..2 {
            let d = svc.create(Notification::new("Bus 7 crashed", "accident")).await.unwrap();
            assert!(!d.is_duplicate());
        }
    }

    #[tokio::test]
    async fn each_admin_gets_a_copy() {
        let (svc, repos, _bus) = service().await;
        seed_staff(repos.as_ref(), "a1@imas.cd", StaffRole::Admin).await;
        seed_staff(repos.as_ref(), "a2@imas.cd", StaffRole::Admin).await;
        seed_staff(repos.as_ref(), "t1@imas.cd", StaffRole::Technician).await;

        assert_eq!(svc.notify_admins("Task T-1 accepted", "TASK_ACCEPTED", "NORMAL").await, 2);
    }

    #[tokio::test]
    async fn role_checked_queries() {
        let (svc, repos, _bus) = service().await;
        let passenger = seed_staff(repos.as_ref(), "p@imas.cd", StaffRole::Passenger).await;

        assert!(matches!(
            svc.for_role(passenger.id, StaffRole::Driver).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.for_role(9999, StaffRole::Driver).await,
            Err(DomainError::NotFound { .. })
        ));

        svc.send_to_role(passenger.id, StaffRole::Passenger, "Welcome", "info", Some("high"))
            .await
            .unwrap();
        let unread = svc.unread_for_role(passenger.id, StaffRole::Passenger).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].priority, "HIGH");

        assert_eq!(svc.unread_count(passenger.id).await.unwrap(), 1);
        svc.mark_all_read(passenger.id).await.unwrap();
        assert_eq!(svc.unread_count(passenger.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn purge_keeps_fresh_entries() {
        let (svc, _repos, _bus) = service().await;
        svc.create(Notification::new("Fresh", "info")).await.unwrap();
        svc.recent
            .insert("stale".into(), Utc::now() - Duration::minutes(DEDUP_WINDOW_MINUTES + 1));
        assert_eq!(svc.purge_cache(), 1);
        assert_eq!(svc.cached_hashes(), 1);
    }
}

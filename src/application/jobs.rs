//! Background housekeeping
//!
//! Two interval loops that stop on the shared shutdown signal: traffic-data
//! retention, and the notification-dedup cache / OTP purge.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::application::identity::StaffService;
use crate::application::notifications::NotificationService;
use crate::application::traffic::TrafficService;
use crate::config::JobsConfig;
use crate::shared::ShutdownSignal;

/// Counts from one cache sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub dedup_hashes: usize,
    pub otp_codes: usize,
}

pub struct Housekeeping {
    traffic: Arc<TrafficService>,
    notifications: Arc<NotificationService>,
    staff: Arc<StaffService>,
    config: JobsConfig,
}

impl Housekeeping {
    pub fn new(
        traffic: Arc<TrafficService>,
        notifications: Arc<NotificationService>,
        staff: Arc<StaffService>,
        config: JobsConfig,
    ) -> Self {
        Self {
            traffic,
            notifications,
            staff,
            config,
        }
    }

    /// Delete traffic rows past retention; returns how many were removed
    pub async fn purge_traffic(&self) -> u64 {
        match self
            .traffic
            .purge_older_than(self.config.traffic_retention_days)
            .await
        {
            Ok(removed) => {
                if removed > 0 {
                    info!("🧹 Removed {} traffic observations older than {} days",
                        removed, self.config.traffic_retention_days);
                }
                removed
            }
            Err(e) => {
                warn!("Traffic retention sweep failed: {}", e);
                0
            }
        }
    }

    pub fn sweep_caches(&self) -> SweepResult {
        let result = SweepResult {
            dedup_hashes: self.notifications.purge_cache(),
            otp_codes: self.staff.otp_store().purge_expired(),
        };
        debug!("Cache sweep: {} dedup hashes, {} OTP codes dropped",
            result.dedup_hashes, result.otp_codes);
        result
    }

    /// Spawn both loops
    pub fn start(self: Arc<Self>, shutdown: ShutdownSignal) {
        let jobs = self.clone();
        let signal = shutdown.clone();
        tokio::spawn(async move {
            let every = jobs.config.traffic_cleanup_interval_secs.max(1);
            info!("🧹 Traffic retention job started (every {}s, keep {} days)",
                every, jobs.config.traffic_retention_days);
            let mut interval = tokio::time::interval(Duration::from_secs(every));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        jobs.purge_traffic().await;
                    }
                    _ = signal.notified().wait() => {
                        info!("🧹 Traffic retention job stopped");
                        break;
                    }
                }
            }
        });

        let jobs = self;
        tokio::spawn(async move {
            let every = jobs.config.cache_cleanup_interval_secs.max(1);
            info!("🧹 Cache sweep job started (every {}s)", every);
            let mut interval = tokio::time::interval(Duration::from_secs(every));
            // The first tick fires immediately and there is nothing to sweep yet
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        jobs.sweep_caches();
                    }
                    _ = shutdown.notified().wait() => {
                        info!("🧹 Cache sweep job stopped");
                        break;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::application::traffic::TrafficInput;
    use crate::config::{MailConfig, SecurityConfig};
    use crate::infrastructure::mail::LogMailer;
    use crate::test_support::repositories;

    async fn housekeeping(retention_days: i64) -> Arc<Housekeeping> {
        let repos = repositories().await;
        let bus = Arc::new(EventBus::new());
        let traffic = Arc::new(TrafficService::new(repos.clone(), bus.clone()));
        let notifications = Arc::new(NotificationService::new(repos.clone(), bus));
        let staff = Arc::new(StaffService::new(
            repos,
            Arc::new(LogMailer::new(&MailConfig::default())),
            &SecurityConfig::default(),
        ));
        Arc::new(Housekeeping::new(
            traffic,
            notifications,
            staff,
            JobsConfig {
                traffic_retention_days: retention_days,
                ..JobsConfig::default()
            },
        ))
    }

    #[tokio::test]
    async fn retention_keeps_recent_rows() {
        let jobs = housekeeping(30).await;
        jobs.traffic
            .record(TrafficInput {
                latitude: Some(-4.3),
                longitude: Some(15.3),
                traffic_level: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(jobs.purge_traffic().await, 0);

        // A negative retention puts the cutoff in the future
        let eager = housekeeping(-1).await;
        eager
            .traffic
            .record(TrafficInput {
                latitude: Some(-4.3),
                longitude: Some(15.3),
                traffic_level: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(eager.purge_traffic().await, 1);

        // An out-of-range retention is logged and skipped
        assert_eq!(housekeeping(i64::MAX).await.purge_traffic().await, 0);
    }

    #[tokio::test]
    async fn sweep_on_empty_caches() {
        let jobs = housekeeping(30).await;
        assert_eq!(jobs.sweep_caches(), SweepResult::default());
    }

    #[tokio::test]
    async fn loops_stop_on_shutdown() {
        let jobs = housekeeping(30).await;
        let shutdown = ShutdownSignal::new();
        jobs.clone().start(shutdown.clone());
        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.trigger();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(shutdown.is_triggered());
    }
}

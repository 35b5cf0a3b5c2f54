//! Driver emergency reports

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::events::{EmergencyReportedEvent, Event, SharedEventBus};
use crate::domain::emergency::{EmergencyReport, EmergencyStatus, EmergencyType};
use crate::domain::incident::Severity;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{days_before, non_blank};

#[derive(Debug, Clone, Default)]
pub struct NewEmergency {
    pub driver_id: Option<i64>,
    pub bus_id: Option<i64>,
    pub emergency_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub struct EmergencyService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl EmergencyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    pub async fn report(&self, input: NewEmergency) -> DomainResult<EmergencyReport> {
        let driver_id = input
            .driver_id
            .ok_or_else(|| DomainError::Validation("Driver ID is required".into()))?;
        let emergency_type = non_blank(input.emergency_type.as_deref())
            .ok_or_else(|| DomainError::Validation("Emergency type is required".into()))
            .and_then(EmergencyType::parse)?;
        let severity = non_blank(input.severity.as_deref())
            .ok_or_else(|| DomainError::Validation("Severity is required".into()))
            .and_then(Severity::parse)?;
        let location = non_blank(input.location.as_deref())
            .ok_or_else(|| DomainError::Validation("Location is required".into()))?
            .to_string();
        let description = non_blank(input.description.as_deref())
            .ok_or_else(|| DomainError::Validation("Description is required".into()))?
            .to_string();

        if self.repos.staff().find_by_id(driver_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Driver not found with id: {}",
                driver_id
            )));
        }

        let now = Utc::now();
        let report = self
            .repos
            .emergency_reports()
            .create(EmergencyReport {
                id: 0,
                driver_id,
                bus_id: input.bus_id,
                emergency_type,
                location,
                description,
                severity,
                latitude: input.latitude,
                longitude: input.longitude,
                status: EmergencyStatus::Pending,
                timestamp: now,
                created_at: now,
                updated_at: now,
            })
            .await?;

        if report.is_high_priority() {
            warn!(report_id = report.id, driver_id, kind = %report.emergency_type, severity = %report.severity, "🚨 High-priority emergency reported");
        } else {
            info!(report_id = report.id, driver_id, kind = %report.emergency_type, "Emergency reported");
        }

        self.event_bus
            .publish(Event::EmergencyReported(EmergencyReportedEvent {
                report_id: report.id,
                driver_id,
                bus_id: report.bus_id,
                emergency_type: report.emergency_type.to_string(),
                severity: report.severity.to_string(),
                location: report.location.clone(),
            }));
        Ok(report)
    }

    pub async fn get(&self, id: i64) -> DomainResult<EmergencyReport> {
        self.repos
            .emergency_reports()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("EmergencyReport", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<EmergencyReport>> {
        self.repos.emergency_reports().find_all().await
    }

    pub async fn by_driver(&self, driver_id: i64) -> DomainResult<Vec<EmergencyReport>> {
        self.repos.emergency_reports().find_by_driver(driver_id).await
    }

    pub async fn recent_by_driver(&self, driver_id: i64, days: i64) -> DomainResult<Vec<EmergencyReport>> {
        if days <= 0 {
            return Err(DomainError::Validation("days must be positive".into()));
        }
        let since = days_before(Utc::now(), days)
            .ok_or_else(|| DomainError::Validation(format!("days out of range: {}", days)))?;
        self.repos
            .emergency_reports()
            .find_by_driver_since(driver_id, since)
            .await
    }

    pub async fn update_status(&self, id: i64, status: &str) -> DomainResult<EmergencyReport> {
        let status = EmergencyStatus::parse(status)?;
        let mut report = self.get(id).await?;
        let old = report.status;
        report.status = status;
        report.updated_at = Utc::now();
        let report = self.repos.emergency_reports().update(report).await?;
        info!(report_id = id, from = %old, to = %status, "Emergency status changed");
        Ok(report)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.emergency_reports().delete(id).await
    }

    /// HIGH and CRITICAL reports, newest first
    pub async fn high_priority(&self) -> DomainResult<Vec<EmergencyReport>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(EmergencyReport::is_high_priority)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::domain::staff::StaffRole;
    use crate::test_support::{repositories, seed_staff};

    fn emergency(driver_id: i64, severity: &str) -> NewEmergency {
        NewEmergency {
            driver_id: Some(driver_id),
            emergency_type: Some("medical".into()),
            location: Some("Rond-point Victoire".into()),
            description: Some("Passenger fainted".into()),
            severity: Some(severity.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn reports_require_a_known_driver_and_valid_enums() {
        let repos = repositories().await;
        let events = Arc::new(EventBus::new());
        let svc = EmergencyService::new(repos.clone(), events.clone());
        let driver = seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let mut sub = events.subscribe();

        assert!(matches!(svc.report(emergency(999, "LOW")).await, Err(DomainError::Validation(_))));
        assert!(matches!(
            svc.report(emergency(driver.id, "APOCALYPTIC")).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.report(NewEmergency { emergency_type: Some("alien".into()), ..emergency(driver.id, "LOW") }).await,
            Err(DomainError::Validation(_))
        ));

        let r = svc.report(emergency(driver.id, "critical")).await.unwrap();
        assert_eq!(r.status, EmergencyStatus::Pending);
        assert_eq!(r.emergency_type, EmergencyType::Medical);
        assert_eq!(sub.recv().await.unwrap().event.event_type(), "emergency_reported");
    }

    #[tokio::test]
    async fn status_priority_and_history() {
        let repos = repositories().await;
        let svc = EmergencyService::new(repos.clone(), Arc::new(EventBus::new()));
        let driver = seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;

        let low = svc.report(emergency(driver.id, "LOW")).await.unwrap();
        let high = svc.report(emergency(driver.id, "HIGH")).await.unwrap();

        let urgent = svc.high_priority().await.unwrap();
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].id, high.id);

        assert!(matches!(svc.update_status(low.id, "DONE").await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.update_status(999, "RESOLVED").await, Err(DomainError::NotFound { .. })));
        assert_eq!(
            svc.update_status(low.id, "in_progress").await.unwrap().status,
            EmergencyStatus::InProgress
        );

        assert_eq!(svc.recent_by_driver(driver.id, 30).await.unwrap().len(), 2);
        assert_eq!(svc.by_driver(driver.id).await.unwrap().len(), 2);
        assert!(matches!(svc.recent_by_driver(driver.id, 0).await, Err(DomainError::Validation(_))));
        assert!(matches!(
            svc.recent_by_driver(driver.id, i64::MAX).await,
            Err(DomainError::Validation(_))
        ));

        svc.delete(low.id).await.unwrap();
        assert!(matches!(svc.get(low.id).await, Err(DomainError::NotFound { .. })));
    }
}

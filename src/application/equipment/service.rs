//! Equipment register and service history

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::domain::equipment::{Equipment, EquipmentQuery, EquipmentStatus, MaintenanceRecord};
use crate::domain::incident::TaskPriority;
use crate::domain::maintenance::MaintenanceTask;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{days_before, non_blank};

#[derive(Debug, Clone, Default)]
pub struct EquipmentInput {
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
}

/// A service to book against an equipment item
#[derive(Debug, Clone, Default)]
pub struct ServiceInput {
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_hours: Option<i32>,
    pub priority: Option<TaskPriority>,
    pub description: Option<String>,
}

pub struct EquipmentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl EquipmentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Equipment> {
        self.repos
            .equipment()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Equipment", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Equipment>> {
        self.repos.equipment().find_all().await
    }

    pub async fn by_status(&self, status: &str) -> DomainResult<Vec<Equipment>> {
        let status = EquipmentStatus::parse(status)?;
        self.repos.equipment().find_by_status(status).await
    }

    /// Blank text filters are ignored
    pub async fn search(&self, mut query: EquipmentQuery) -> DomainResult<Vec<Equipment>> {
        for field in [&mut query.name, &mut query.model, &mut query.location] {
            *field = non_blank(field.as_deref()).map(str::to_string);
        }
        self.repos.equipment().search(&query).await
    }

    fn apply(equipment: &mut Equipment, input: EquipmentInput) {
        if let Some(v) = non_blank(input.name.as_deref()) {
            equipment.name = v.to_string();
        }
        if let Some(v) = input.model {
            equipment.model = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = input.serial_number {
            equipment.serial_number = non_blank(Some(&v)).map(str::to_string);
        }
        if input.installation_date.is_some() {
            equipment.installation_date = input.installation_date;
        }
        if let Some(v) = input.location {
            equipment.location = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(status) = input.status {
            equipment.status = status;
        }
    }

    async fn ensure_serial_free(&self, serial: Option<&str>, own_id: i64) -> DomainResult<()> {
        let Some(serial) = serial else {
            return Ok(());
        };
        match self.repos.equipment().find_by_serial(serial).await? {
            Some(other) if other.id != own_id => Err(DomainError::Conflict(format!(
                "Serial number already exists: {}",
                serial
            ))),
            _ => Ok(()),
        }
    }

    pub async fn create(&self, input: EquipmentInput) -> DomainResult<Equipment> {
        let name = non_blank(input.name.as_deref())
            .ok_or_else(|| DomainError::Validation("Name is required".into()))?
            .to_string();
        let mut equipment = Equipment::new(name);
        Self::apply(&mut equipment, input);
        self.ensure_serial_free(equipment.serial_number.as_deref(), 0).await?;

        let equipment = self.repos.equipment().create(equipment).await?;
        info!(equipment_id = equipment.id, name = %equipment.name, "Equipment registered");
        Ok(equipment)
    }

    pub async fn update(&self, id: i64, input: EquipmentInput) -> DomainResult<Equipment> {
        let mut equipment = self.get(id).await?;
        Self::apply(&mut equipment, input);
        self.ensure_serial_free(equipment.serial_number.as_deref(), id).await?;
        equipment.updated_at = Utc::now();
        self.repos.equipment().update(equipment).await
    }

    pub async fn update_status(&self, id: i64, status: &str) -> DomainResult<Equipment> {
        let status = EquipmentStatus::parse(status)?;
        let mut equipment = self.get(id).await?;
        if equipment.status == status {
            return Ok(equipment);
        }
        info!(equipment_id = id, from = %equipment.status, to = %status, "Equipment status changed");
        equipment.status = status;
        equipment.updated_at = Utc::now();
        self.repos.equipment().update(equipment).await
    }

    /// Tasks that referenced the item keep their free-text label but lose the link.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        let tasks = self.repos.maintenance_tasks().find_by_equipment(id).await?;
        self.repos.equipment().delete(id).await?;
        for mut task in tasks {
            task.equipment_id = None;
            self.repos.maintenance_tasks().update(task).await?;
        }
        Ok(())
    }

    /// Service records, oldest first, optionally limited to those started in `from..=to`
    pub async fn maintenance_history(
        &self,
        id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> DomainResult<Vec<MaintenanceRecord>> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(DomainError::Validation(
                    "Start date must not be after end date".into(),
                ));
            }
        }
        self.get(id).await?;
        let records = self.repos.maintenance_records().find_by_equipment(id).await?;
        Ok(records
            .into_iter()
            .filter(|r| {
                r.started_between(from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))
            })
            .collect())
    }

    pub async fn reliability(&self, id: i64) -> DomainResult<f64> {
        let equipment = self.get(id).await?;
        let history = self.repos.maintenance_records().find_by_equipment(id).await?;
        Ok(equipment.reliability(&history, Utc::now().date_naive()))
    }

    /// Book a service: the record is stored and the item returns to operation.
    pub async fn perform_maintenance(
        &self,
        id: i64,
        input: ServiceInput,
    ) -> DomainResult<(Equipment, MaintenanceRecord)> {
        let mut equipment = self.get(id).await?;
        if equipment.status == EquipmentStatus::Retired {
            return Err(DomainError::Conflict(format!(
                "Equipment {} is retired",
                id
            )));
        }

        let description = non_blank(input.description.as_deref())
            .ok_or_else(|| DomainError::Validation("Description is required".into()))?
            .to_string();
        let now = Utc::now();
        let start_date = input.start_date.unwrap_or_else(|| now.date_naive());
        if input.end_date.is_some_and(|end| end < start_date) {
            return Err(DomainError::Validation(
                "End date must not be before start date".into(),
            ));
        }
        let estimated_hours = input.estimated_hours.unwrap_or(0);
        if estimated_hours < 0 {
            return Err(DomainError::Validation(
                "Estimated hours cannot be negative".into(),
            ));
        }

        let record = self
            .repos
            .maintenance_records()
            .create(MaintenanceRecord {
                id: 0,
                equipment_id: id,
                start_date,
                end_date: input.end_date,
                estimated_hours,
                priority: input.priority.unwrap_or(TaskPriority::Medium),
                description,
                created_at: now,
            })
            .await?;

        equipment.record_service(&record, now);
        let equipment = self.repos.equipment().update(equipment).await?;
        info!(equipment_id = id, record_id = record.id, "Equipment maintenance recorded");
        Ok((equipment, record))
    }

    /// Active items never serviced, or last serviced more than `days` ago
    pub async fn need_maintenance(&self, days: i64) -> DomainResult<Vec<Equipment>> {
        if days < 0 {
            return Err(DomainError::Validation(
                "days must not be negative".into(),
            ));
        }
        let threshold = days_before(Utc::now(), days)
            .ok_or_else(|| DomainError::Validation(format!("days out of range: {}", days)))?
            .date_naive();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|e| e.status != EquipmentStatus::Retired && e.needs_maintenance(threshold))
            .collect())
    }

    /// Count per status; every status is present
    pub async fn stats_by_status(&self) -> DomainResult<BTreeMap<String, u64>> {
        let mut stats: BTreeMap<String, u64> = EquipmentStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for e in self.list().await? {
            *stats.entry(e.status.as_str().to_string()).or_default() += 1;
        }
        Ok(stats)
    }

    /// Count per location; items without one fall under `UNKNOWN`
    pub async fn stats_by_location(&self) -> DomainResult<BTreeMap<String, u64>> {
        let mut stats = BTreeMap::new();
        for e in self.list().await? {
            let key = e.location.unwrap_or_else(|| "UNKNOWN".to_string());
            *stats.entry(key).or_default() += 1;
        }
        Ok(stats)
    }

    pub async fn tasks(&self, id: i64) -> DomainResult<Vec<MaintenanceTask>> {
        self.get(id).await?;
        self.repos.maintenance_tasks().find_by_equipment(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::repositories;

    fn lift(serial: &str, location: Option<&str>) -> EquipmentInput {
        EquipmentInput {
            name: Some("Bus lift".into()),
            model: Some("HL-4000".into()),
            serial_number: Some(serial.into()),
            location: location.map(str::to_string),
            ..Default::default()
        }
    }

    fn service(description: &str, end: Option<NaiveDate>) -> ServiceInput {
        ServiceInput {
            start_date: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            end_date: end,
            estimated_hours: Some(3),
            priority: Some(TaskPriority::High),
            description: Some(description.into()),
        }
    }

    #[tokio::test]
    async fn register_update_and_delete() {
        let svc = EquipmentService::new(repositories().await);
        let e = svc.create(lift("SN-1", Some("Depot A"))).await.unwrap();
        assert_eq!(e.status, EquipmentStatus::Operational);

        assert!(matches!(svc.create(lift("SN-1", None)).await, Err(DomainError::Conflict(_))));
        assert!(matches!(
            svc.create(EquipmentInput { name: Some("  ".into()), ..Default::default() }).await,
            Err(DomainError::Validation(_))
        ));

        let moved = svc
            .update(e.id, EquipmentInput { location: Some("Depot B".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(moved.location.as_deref(), Some("Depot B"));
        assert_eq!(moved.serial_number.as_deref(), Some("SN-1"));

        let broken = svc.update_status(e.id, "defective").await.unwrap();
        assert_eq!(broken.status, EquipmentStatus::Defective);
        assert!(matches!(svc.update_status(e.id, "BROKEN").await, Err(DomainError::Validation(_))));
        assert_eq!(svc.by_status("DEFECTIVE").await.unwrap().len(), 1);

        svc.delete(e.id).await.unwrap();
        assert!(matches!(svc.delete(e.id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.get(e.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn maintenance_brings_equipment_back() {
        let svc = EquipmentService::new(repositories().await);
        let e = svc.create(lift("SN-2", None)).await.unwrap();
        svc.update_status(e.id, "UNDER_MAINTENANCE").await.unwrap();

        let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let (after, record) = svc
            .perform_maintenance(e.id, service("Hydraulic seals replaced", Some(end)))
            .await
            .unwrap();
        assert_eq!(after.status, EquipmentStatus::Operational);
        assert_eq!(after.last_maintenance_date, Some(end));
        assert_eq!(record.equipment_id, e.id);

        assert!(matches!(
            svc.perform_maintenance(e.id, service(" ", None)).await,
            Err(DomainError::Validation(_))
        ));
        let backwards = ServiceInput {
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            ..service("Check", None)
        };
        assert!(matches!(
            svc.perform_maintenance(e.id, backwards).await,
            Err(DomainError::Validation(_))
        ));

        let march = svc
            .maintenance_history(e.id, NaiveDate::from_ymd_opt(2025, 3, 1), NaiveDate::from_ymd_opt(2025, 3, 31))
            .await
            .unwrap();
        assert_eq!(march.len(), 1);
        let april = svc
            .maintenance_history(e.id, NaiveDate::from_ymd_opt(2025, 4, 1), None)
            .await
            .unwrap();
        assert!(april.is_empty());
        assert!(matches!(
            svc.maintenance_history(e.id, NaiveDate::from_ymd_opt(2025, 4, 1), NaiveDate::from_ymd_opt(2025, 3, 1))
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.maintenance_history(999, None, None).await,
            Err(DomainError::NotFound { .. })
        ));

        assert!(svc.reliability(e.id).await.unwrap() < 1.0);

        svc.update_status(e.id, "RETIRED").await.unwrap();
        assert!(matches!(
            svc.perform_maintenance(e.id, service("Late fix", None)).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn maintenance_due_and_stats() {
        let svc = EquipmentService::new(repositories().await);
        let never = svc.create(lift("SN-3", Some("Depot A"))).await.unwrap();
        let serviced = svc.create(lift("SN-4", Some("Depot A"))).await.unwrap();
        let retired = svc.create(lift("SN-5", None)).await.unwrap();
        svc.update_status(retired.id, "RETIRED").await.unwrap();

        let today = Utc::now().date_naive();
        svc.perform_maintenance(
            serviced.id,
            ServiceInput {
                start_date: Some(today),
                end_date: Some(today),
                description: Some("Annual inspection".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let due: Vec<i64> = svc.need_maintenance(30).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(due, vec![never.id]);
        assert!(matches!(svc.need_maintenance(-1).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.need_maintenance(i64::MAX).await, Err(DomainError::Validation(_))));

        let by_status = svc.stats_by_status().await.unwrap();
        assert_eq!(by_status["OPERATIONAL"], 2);
        assert_eq!(by_status["RETIRED"], 1);
        assert_eq!(by_status["DEFECTIVE"], 0);

        let by_location = svc.stats_by_location().await.unwrap();
        assert_eq!(by_location["Depot A"], 2);
        assert_eq!(by_location["UNKNOWN"], 1);

        let found = svc
            .search(EquipmentQuery {
                location: Some("depot".into()),
                name: Some(" ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        let operational_lifts = svc
            .search(EquipmentQuery {
                model: Some("HL".into()),
                status: Some(EquipmentStatus::Operational),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(operational_lifts.len(), 2);
    }
}

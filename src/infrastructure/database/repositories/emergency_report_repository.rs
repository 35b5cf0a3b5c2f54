//! SeaORM implementation of EmergencyReportRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::emergency::{
    EmergencyReport, EmergencyReportRepository, EmergencyStatus, EmergencyType,
};
use crate::domain::incident::Severity;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::emergency_report;

pub struct SeaOrmEmergencyReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmergencyReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: emergency_report::Model) -> EmergencyReport {
    EmergencyReport {
        id: m.id,
        driver_id: m.driver_id,
        bus_id: m.bus_id,
        emergency_type: EmergencyType::from_str(&m.emergency_type).unwrap_or(EmergencyType::Other),
        location: m.location,
        description: m.description,
        severity: Severity::from_str(&m.severity).unwrap_or(Severity::Medium),
        latitude: m.latitude,
        longitude: m.longitude,
        status: EmergencyStatus::from_str(&m.status).unwrap_or(EmergencyStatus::Pending),
        timestamp: m.timestamp,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: EmergencyReport) -> emergency_report::ActiveModel {
    emergency_report::ActiveModel {
        id: if r.id > 0 { Set(r.id) } else { NotSet },
        driver_id: Set(r.driver_id),
        bus_id: Set(r.bus_id),
        emergency_type: Set(r.emergency_type.as_str().to_string()),
        location: Set(r.location),
        description: Set(r.description),
        severity: Set(r.severity.as_str().to_string()),
        latitude: Set(r.latitude),
        longitude: Set(r.longitude),
        status: Set(r.status.as_str().to_string()),
        timestamp: Set(r.timestamp),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

#[async_trait]
impl EmergencyReportRepository for SeaOrmEmergencyReportRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<EmergencyReport>> {
        let m = emergency_report::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<EmergencyReport>> {
        let models = emergency_report::Entity::find()
            .order_by_desc(emergency_report::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_driver(&self, driver_id: i64) -> DomainResult<Vec<EmergencyReport>> {
        let models = emergency_report::Entity::find()
            .filter(emergency_report::Column::DriverId.eq(driver_id))
            .order_by_desc(emergency_report::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_driver_since(
        &self,
        driver_id: i64,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<EmergencyReport>> {
        let models = emergency_report::Entity::find()
            .filter(emergency_report::Column::DriverId.eq(driver_id))
            .filter(emergency_report::Column::Timestamp.gte(since))
            .order_by_desc(emergency_report::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, mut r: EmergencyReport) -> DomainResult<EmergencyReport> {
        r.id = 0;
        let model = domain_to_active(r)
            .insert(&self.db)
            .await
            .map_err(write_err("EmergencyReport"))?;
        debug!(
            "Created emergency report {} from driver {}",
            model.id, model.driver_id
        );
        Ok(model_to_domain(model))
    }

    async fn update(&self, r: EmergencyReport) -> DomainResult<EmergencyReport> {
        let model = domain_to_active(r)
            .update(&self.db)
            .await
            .map_err(write_err("EmergencyReport"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = emergency_report::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("EmergencyReport", "id", id));
        }
        Ok(())
    }
}

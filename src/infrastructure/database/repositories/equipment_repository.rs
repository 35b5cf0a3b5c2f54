//! SeaORM implementation of EquipmentRepository and MaintenanceRecordRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::equipment::{
    Equipment, EquipmentQuery, EquipmentRepository, EquipmentStatus, MaintenanceRecord,
    MaintenanceRecordRepository,
};
use crate::domain::incident::TaskPriority;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{equipment, maintenance_record};

pub struct SeaOrmEquipmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmEquipmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: equipment::Model) -> Equipment {
    Equipment {
        id: m.id,
        name: m.name,
        model: m.model,
        serial_number: m.serial_number,
        installation_date: m.installation_date,
        location: m.location,
        status: EquipmentStatus::from_str(&m.status).unwrap_or(EquipmentStatus::Operational),
        last_maintenance_date: m.last_maintenance_date,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(e: Equipment) -> equipment::ActiveModel {
    equipment::ActiveModel {
        id: if e.id > 0 { Set(e.id) } else { NotSet },
        name: Set(e.name),
        model: Set(e.model),
        serial_number: Set(e.serial_number),
        installation_date: Set(e.installation_date),
        location: Set(e.location),
        status: Set(e.status.as_str().to_string()),
        last_maintenance_date: Set(e.last_maintenance_date),
        created_at: Set(e.created_at),
        updated_at: Set(e.updated_at),
    }
}

/// SQLite `LIKE` already folds ASCII case.
fn query_condition(query: &EquipmentQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(name) = query.name.as_deref() {
        cond = cond.add(equipment::Column::Name.contains(name));
    }
    if let Some(model) = query.model.as_deref() {
        cond = cond.add(equipment::Column::Model.contains(model));
    }
    if let Some(location) = query.location.as_deref() {
        cond = cond.add(equipment::Column::Location.contains(location));
    }
    if let Some(status) = query.status {
        cond = cond.add(equipment::Column::Status.eq(status.as_str()));
    }
    cond
}

#[async_trait]
impl EquipmentRepository for SeaOrmEquipmentRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Equipment>> {
        let m = equipment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_by_serial(&self, serial_number: &str) -> DomainResult<Option<Equipment>> {
        let m = equipment::Entity::find()
            .filter(equipment::Column::SerialNumber.eq(serial_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Equipment>> {
        let models = equipment::Entity::find()
            .order_by_asc(equipment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_status(&self, status: EquipmentStatus) -> DomainResult<Vec<Equipment>> {
        let models = equipment::Entity::find()
            .filter(equipment::Column::Status.eq(status.as_str()))
            .order_by_asc(equipment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn search(&self, query: &EquipmentQuery) -> DomainResult<Vec<Equipment>> {
        let models = equipment::Entity::find()
            .filter(query_condition(query))
            .order_by_asc(equipment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, mut e: Equipment) -> DomainResult<Equipment> {
        e.id = 0;
        let model = domain_to_active(e)
            .insert(&self.db)
            .await
            .map_err(write_err("Equipment"))?;
        debug!("Created equipment {} ({})", model.id, model.name);
        Ok(model_to_domain(model))
    }

    async fn update(&self, e: Equipment) -> DomainResult<Equipment> {
        let model = domain_to_active(e)
            .update(&self.db)
            .await
            .map_err(write_err("Equipment"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = equipment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Equipment", "id", id));
        }
        Ok(())
    }
}

// ── Maintenance records ─────────────────────────────────────────────

pub struct SeaOrmMaintenanceRecordRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaintenanceRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn record_to_domain(m: maintenance_record::Model) -> MaintenanceRecord {
    MaintenanceRecord {
        id: m.id,
        equipment_id: m.equipment_id,
        start_date: m.start_date,
        end_date: m.end_date,
        estimated_hours: m.estimated_hours,
        priority: TaskPriority::from_str(&m.priority).unwrap_or(TaskPriority::Medium),
        description: m.description,
        created_at: m.created_at,
    }
}

#[async_trait]
impl MaintenanceRecordRepository for SeaOrmMaintenanceRecordRepository {
    async fn create(&self, r: MaintenanceRecord) -> DomainResult<MaintenanceRecord> {
        let model = maintenance_record::ActiveModel {
            id: NotSet,
            equipment_id: Set(r.equipment_id),
            start_date: Set(r.start_date),
            end_date: Set(r.end_date),
            estimated_hours: Set(r.estimated_hours),
            priority: Set(r.priority.as_str().to_string()),
            description: Set(r.description),
            created_at: Set(r.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(write_err("MaintenanceRecord"))?;
        debug!(
            "Recorded maintenance {} on equipment {}",
            model.id, model.equipment_id
        );
        Ok(record_to_domain(model))
    }

    async fn find_by_equipment(&self, equipment_id: i64) -> DomainResult<Vec<MaintenanceRecord>> {
        let models = maintenance_record::Entity::find()
            .filter(maintenance_record::Column::EquipmentId.eq(equipment_id))
            .order_by_asc(maintenance_record::Column::StartDate)
            .order_by_asc(maintenance_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(record_to_domain).collect())
    }
}

//! SeaORM implementation of MaintenanceTaskRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, from_json_list, to_json_list, write_err};
use crate::domain::maintenance::{
    MaintenancePriority, MaintenanceStatus, MaintenanceTask, MaintenanceTaskRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::maintenance_task;

pub struct SeaOrmMaintenanceTaskRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaintenanceTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: maintenance_task::Model) -> MaintenanceTask {
    MaintenanceTask {
        task_id: m.task_id,
        description: m.description,
        priority: MaintenancePriority::from_str(&m.priority).unwrap_or(MaintenancePriority::Medium),
        estimated_duration_minutes: m.estimated_duration_minutes,
        required_skills: from_json_list(&m.required_skills),
        required_parts: from_json_list(&m.required_parts),
        status: MaintenanceStatus::from_str(&m.status).unwrap_or(MaintenanceStatus::Planned),
        equipment: m.equipment,
        equipment_id: m.equipment_id,
        assigned_technician_id: m.assigned_technician_id,
        completion_percentage: m.completion_percentage,
        creation_date: m.creation_date,
        due_date: m.due_date,
        last_updated: m.last_updated,
        completion_date: m.completion_date,
    }
}

fn domain_to_active(t: MaintenanceTask) -> maintenance_task::ActiveModel {
    maintenance_task::ActiveModel {
        task_id: Set(t.task_id),
        description: Set(t.description),
        priority: Set(t.priority.as_str().to_string()),
        estimated_duration_minutes: Set(t.estimated_duration_minutes),
        required_skills: Set(to_json_list(&t.required_skills)),
        required_parts: Set(to_json_list(&t.required_parts)),
        status: Set(t.status.as_str().to_string()),
        equipment: Set(t.equipment),
        equipment_id: Set(t.equipment_id),
        assigned_technician_id: Set(t.assigned_technician_id),
        completion_percentage: Set(t.completion_percentage),
        creation_date: Set(t.creation_date),
        due_date: Set(t.due_date),
        last_updated: Set(t.last_updated),
        completion_date: Set(t.completion_date),
    }
}

#[async_trait]
impl MaintenanceTaskRepository for SeaOrmMaintenanceTaskRepository {
    async fn find_by_id(&self, task_id: &str) -> DomainResult<Option<MaintenanceTask>> {
        let m = maintenance_task::Entity::find_by_id(task_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<MaintenanceTask>> {
        let models = maintenance_task::Entity::find()
            .order_by_desc(maintenance_task::Column::CreationDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_statuses(
        &self,
        statuses: &[MaintenanceStatus],
    ) -> DomainResult<Vec<MaintenanceTask>> {
        let values: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let models = maintenance_task::Entity::find()
            .filter(maintenance_task::Column::Status.is_in(values))
            .order_by_desc(maintenance_task::Column::CreationDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_priority(
        &self,
        priority: MaintenancePriority,
    ) -> DomainResult<Vec<MaintenanceTask>> {
        let models = maintenance_task::Entity::find()
            .filter(maintenance_task::Column::Priority.eq(priority.as_str()))
            .order_by_desc(maintenance_task::Column::CreationDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_technician(&self, technician_id: i64) -> DomainResult<Vec<MaintenanceTask>> {
        let models = maintenance_task::Entity::find()
            .filter(maintenance_task::Column::AssignedTechnicianId.eq(technician_id))
            .order_by_desc(maintenance_task::Column::CreationDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_equipment(&self, equipment_id: i64) -> DomainResult<Vec<MaintenanceTask>> {
        let models = maintenance_task::Entity::find()
            .filter(maintenance_task::Column::EquipmentId.eq(equipment_id))
            .order_by_desc(maintenance_task::Column::CreationDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists(&self, task_id: &str) -> DomainResult<bool> {
        let count = maintenance_task::Entity::find()
            .filter(maintenance_task::Column::TaskId.eq(task_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create(&self, t: MaintenanceTask) -> DomainResult<MaintenanceTask> {
        let model = domain_to_active(t)
            .insert(&self.db)
            .await
            .map_err(write_err("MaintenanceTask"))?;
        debug!("Created maintenance task {}", model.task_id);
        Ok(model_to_domain(model))
    }

    async fn update(&self, t: MaintenanceTask) -> DomainResult<MaintenanceTask> {
        let model = domain_to_active(t)
            .update(&self.db)
            .await
            .map_err(write_err("MaintenanceTask"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, task_id: &str) -> DomainResult<()> {
        let res = maintenance_task::Entity::delete_by_id(task_id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("MaintenanceTask", "taskId", task_id));
        }
        Ok(())
    }
}

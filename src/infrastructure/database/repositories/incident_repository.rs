//! SeaORM implementations of IncidentRepository and IncidentTaskRepository

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{db_err, write_err};
use crate::domain::incident::{
    Incident, IncidentRepository, IncidentStatus, IncidentTask, IncidentTaskRepository,
    IncidentTaskStatus, IncidentType, Severity, TaskPriority,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{incident, incident_task};

pub struct SeaOrmIncidentRepository {
    db: DatabaseConnection,
}

impl SeaOrmIncidentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn incident_to_domain(m: incident::Model) -> Incident {
    Incident {
        incident_id: m.incident_id,
        incident_type: IncidentType::from_str(&m.incident_type)
            .unwrap_or(IncidentType::EquipmentMalfunction),
        location: m.location,
        severity: Severity::from_str(&m.severity).unwrap_or(Severity::Low),
        date_time: m.date_time,
        status: IncidentStatus::from_str(&m.status).unwrap_or(IncidentStatus::Reported),
        summary: m.summary,
        bus_id: m.bus_id,
        assigned_technician_id: m.assigned_technician_id,
        assigned_technician_name: m.assigned_technician_name,
        assigned_team_id: m.assigned_team_id,
        resolution_time: m.resolution_time,
        additional_details: serde_json::from_str::<BTreeMap<String, String>>(
            &m.additional_details,
        )
        .unwrap_or_default(),
    }
}

fn incident_to_active(i: Incident) -> incident::ActiveModel {
    incident::ActiveModel {
        incident_id: Set(i.incident_id),
        incident_type: Set(i.incident_type.as_str().to_string()),
        location: Set(i.location),
        severity: Set(i.severity.as_str().to_string()),
        date_time: Set(i.date_time),
        status: Set(i.status.as_str().to_string()),
        summary: Set(i.summary),
        bus_id: Set(i.bus_id),
        assigned_technician_id: Set(i.assigned_technician_id),
        assigned_technician_name: Set(i.assigned_technician_name),
        assigned_team_id: Set(i.assigned_team_id),
        resolution_time: Set(i.resolution_time),
        additional_details: Set(
            serde_json::to_string(&i.additional_details).unwrap_or_else(|_| "{}".to_string())
        ),
    }
}

#[async_trait]
impl IncidentRepository for SeaOrmIncidentRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Incident>> {
        let m = incident::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(incident_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Incident>> {
        let models = incident::Entity::find()
            .order_by_desc(incident::Column::DateTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(incident_to_domain).collect())
    }

    async fn find_by_bus(&self, bus_id: i64) -> DomainResult<Vec<Incident>> {
        let models = incident::Entity::find()
            .filter(incident::Column::BusId.eq(bus_id))
            .order_by_desc(incident::Column::DateTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(incident_to_domain).collect())
    }

    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<Incident>> {
        let models = incident::Entity::find()
            .order_by_desc(incident::Column::DateTime)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(incident_to_domain).collect())
    }

    async fn find_by_technician(&self, technician_id: i64) -> DomainResult<Vec<Incident>> {
        let models = incident::Entity::find()
            .filter(incident::Column::AssignedTechnicianId.eq(technician_id))
            .order_by_desc(incident::Column::DateTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(incident_to_domain).collect())
    }

    async fn create(&self, i: Incident) -> DomainResult<Incident> {
        let model = incident_to_active(i)
            .insert(&self.db)
            .await
            .map_err(write_err("Incident"))?;
        debug!("Created incident {} ({})", model.incident_id, model.incident_type);
        Ok(incident_to_domain(model))
    }

    async fn update(&self, i: Incident) -> DomainResult<Incident> {
        let model = incident_to_active(i)
            .update(&self.db)
            .await
            .map_err(write_err("Incident"))?;
        Ok(incident_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let res = incident::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Incident", "id", id));
        }
        Ok(())
    }
}

pub struct SeaOrmIncidentTaskRepository {
    db: DatabaseConnection,
}

impl SeaOrmIncidentTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn task_to_domain(m: incident_task::Model) -> IncidentTask {
    IncidentTask {
        id: m.id,
        incident_id: m.incident_id,
        technician_id: m.technician_id,
        description: m.description,
        priority: TaskPriority::from_str(&m.priority).unwrap_or(TaskPriority::Medium),
        deadline: m.deadline,
        progress: m.progress,
        status: IncidentTaskStatus::from_str(&m.status).unwrap_or(IncidentTaskStatus::Pending),
        progress_notes: m.progress_notes,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl IncidentTaskRepository for SeaOrmIncidentTaskRepository {
    async fn find_by_incident(&self, incident_id: &str) -> DomainResult<Vec<IncidentTask>> {
        let models = incident_task::Entity::find()
            .filter(incident_task::Column::IncidentId.eq(incident_id))
            .order_by_asc(incident_task::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(task_to_domain).collect())
    }

    async fn find_by_technician(&self, technician_id: i64) -> DomainResult<Vec<IncidentTask>> {
        let models = incident_task::Entity::find()
            .filter(incident_task::Column::TechnicianId.eq(technician_id))
            .order_by_desc(incident_task::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(task_to_domain).collect())
    }

    async fn create(&self, t: IncidentTask) -> DomainResult<IncidentTask> {
        let active = incident_task::ActiveModel {
            id: NotSet,
            incident_id: Set(t.incident_id),
            technician_id: Set(t.technician_id),
            description: Set(t.description),
            priority: Set(t.priority.as_str().to_string()),
            deadline: Set(t.deadline),
            progress: Set(t.progress),
            status: Set(t.status.as_str().to_string()),
            progress_notes: Set(t.progress_notes),
            created_at: Set(t.created_at),
            updated_at: Set(t.updated_at),
        };
        let model = active
            .insert(&self.db)
            .await
            .map_err(write_err("IncidentTask"))?;
        Ok(task_to_domain(model))
    }
}

//! Maintenance task entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub task_id: String,
    pub description: String,
    pub priority: String,
    pub estimated_duration_minutes: i32,
    /// JSON array of strings
    pub required_skills: String,
    /// JSON array of strings
    pub required_parts: String,
    pub status: String,
    pub equipment: Option<String>,
    pub equipment_id: Option<i64>,
    pub assigned_technician_id: Option<i64>,
    pub completion_percentage: i32,
    pub creation_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

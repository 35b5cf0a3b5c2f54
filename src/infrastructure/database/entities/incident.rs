//! Incident entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incidents")]
pub struct Model {
    /// UUID string
    #[sea_orm(primary_key, auto_increment = false)]
    pub incident_id: String,
    pub incident_type: String,
    pub location: String,
    pub severity: String,
    pub date_time: DateTime<Utc>,
    pub status: String,
    pub summary: Option<String>,
    pub bus_id: Option<i64>,
    pub assigned_technician_id: Option<i64>,
    pub assigned_technician_name: Option<String>,
    pub assigned_team_id: Option<i64>,
    pub resolution_time: Option<DateTime<Utc>>,
    /// JSON object of string values
    pub additional_details: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::incident_task::Entity")]
    Tasks,
}

impl Related<super::incident_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

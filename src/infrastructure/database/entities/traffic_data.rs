//! Traffic data entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "traffic_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub traffic_level: i32,
    pub average_speed: Option<f64>,
    pub weather_condition: Option<String>,
    pub is_holiday: bool,
    pub day_of_week: i32,
    pub hour_of_day: i32,
    pub vehicle_count: Option<i32>,
    pub visibility: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub road_type: Option<String>,
    pub event_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

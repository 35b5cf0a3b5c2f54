//! Ticket entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub passenger_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub ticket_number: String,
    pub reservation_code: String,
    pub seat_number: String,
    pub departure_time: DateTime<Utc>,
    pub boarding_time: Option<DateTime<Utc>>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// ISSUED, PAID or BOARDED
    pub status: String,
    pub qr_code: Option<String>,
    pub luggage_weight: Option<f64>,
    pub has_luggage: bool,
    pub bus_id: i64,
    pub driver_id: Option<i64>,
    pub trip_id: Option<i64>,
    pub issued_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bus::Entity",
        from = "Column::BusId",
        to = "super::bus::Column::Id",
        on_delete = "Cascade"
    )]
    Bus,
}

impl Related<super::bus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

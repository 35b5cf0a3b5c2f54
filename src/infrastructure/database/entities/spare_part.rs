//! Spare part entity for database

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "spare_parts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub minimum_stock_level: i32,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

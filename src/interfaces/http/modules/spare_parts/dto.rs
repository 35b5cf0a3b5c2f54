//! Spare part DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::inventory::SparePartInput;
use crate::domain::spare_part::SparePart;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SparePartDto {
    pub id: i64,
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub minimum_stock_level: i32,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
    pub low_stock: bool,
}

impl From<SparePart> for SparePartDto {
    fn from(p: SparePart) -> Self {
        let low_stock = p.is_low_stock();
        Self {
            id: p.id,
            part_number: p.part_number,
            name: p.name,
            description: p.description,
            quantity: p.quantity,
            minimum_stock_level: p.minimum_stock_level,
            location: p.location,
            supplier: p.supplier,
            unit_price: p.unit_price,
            category: p.category,
            low_stock,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SparePartRequest {
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub minimum_stock_level: Option<i32>,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
}

impl From<SparePartRequest> for SparePartInput {
    fn from(r: SparePartRequest) -> Self {
        Self {
            part_number: r.part_number,
            name: r.name,
            description: r.description,
            quantity: r.quantity,
            minimum_stock_level: r.minimum_stock_level,
            location: r.location,
            supplier: r.supplier,
            unit_price: r.unit_price,
            category: r.category,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockChangeRequest {
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Matched against name, part number and description
    #[serde(default)]
    pub q: String,
}

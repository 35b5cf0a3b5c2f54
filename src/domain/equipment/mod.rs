//! Equipment aggregate

pub mod model;
pub mod repository;

pub use model::{Equipment, EquipmentStatus, MaintenanceRecord};
pub use repository::{EquipmentQuery, EquipmentRepository, MaintenanceRecordRepository};

//! Maintenance task aggregate

pub mod model;
pub mod repository;

pub use model::{MaintenancePriority, MaintenanceStatus, MaintenanceTask, TaskNotice};
pub use repository::MaintenanceTaskRepository;

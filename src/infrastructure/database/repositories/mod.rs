//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod bus_repository;
pub mod emergency_report_repository;
pub mod equipment_repository;
pub mod incident_repository;
pub mod maintenance_task_repository;
pub mod notification_repository;
pub mod repository_provider;
pub mod route_repository;
pub mod schedule_repository;
pub mod spare_part_repository;
pub mod staff_repository;
pub mod ticket_repository;
pub mod traffic_data_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

/// Map a failed insert/update, turning unique-key violations into conflicts.
pub(crate) fn write_err(what: &'static str) -> impl Fn(sea_orm::DbErr) -> DomainError {
    move |e| {
        let msg = e.to_string();
        if msg.contains("UNIQUE") || msg.contains("duplicate") {
            DomainError::Conflict(format!("{} already exists", what))
        } else if matches!(e, sea_orm::DbErr::RecordNotUpdated) {
            DomainError::not_found(what, "id", "unknown")
        } else {
            db_err(e)
        }
    }
}

/// Encode a string list column.
pub(crate) fn to_json_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a string list column; malformed text yields an empty list.
pub(crate) fn from_json_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

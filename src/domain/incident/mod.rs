//! Incident aggregate
//!
//! Incidents and the technician tasks created when they are assigned.

pub mod model;
pub mod repository;

pub use model::{
    Incident, IncidentStatus, IncidentTask, IncidentTaskStatus, IncidentType, Severity,
    TaskPriority,
};
pub use repository::{IncidentRepository, IncidentTaskRepository};

//! Emergency report aggregate

pub mod model;
pub mod repository;

pub use model::{EmergencyReport, EmergencyStatus, EmergencyType};
pub use repository::EmergencyReportRepository;

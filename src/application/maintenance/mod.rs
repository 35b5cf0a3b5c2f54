pub mod service;

pub use service::{MaintenanceService, NewTask, TaskUpdate, TechnicianTaskStats};

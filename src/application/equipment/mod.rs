pub mod service;

pub use service::{EquipmentInput, EquipmentService, ServiceInput};

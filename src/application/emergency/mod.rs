pub mod service;

pub use service::{EmergencyService, NewEmergency};

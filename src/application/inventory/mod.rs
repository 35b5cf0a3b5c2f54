pub mod service;

pub use service::{InventoryService, SparePartInput};

//! Analytics module: dashboards over staff, fleet and ticket revenue

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

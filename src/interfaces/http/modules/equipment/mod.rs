//! Equipment register and service history

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

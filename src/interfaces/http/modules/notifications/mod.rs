//! Notifications module: per-user inboxes plus driver and passenger channels

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

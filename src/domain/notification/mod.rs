//! Notification aggregate

pub mod model;
pub mod repository;

pub use model::{Notification, DEFAULT_PRIORITY};
pub use repository::NotificationRepository;

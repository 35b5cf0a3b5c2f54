//! Notification delivery and duplicate suppression

pub mod service;

pub use service::{content_hash, normalize_message, Delivery, NotificationService, DEDUP_WINDOW_MINUTES};

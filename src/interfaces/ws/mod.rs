//! WebSocket event streams
//!
//! - `/ws/notifications`: every bus event, optionally filtered by topic and recipient
//! - `/ws/traffic-data`: traffic observations only

pub mod notifications;

pub use notifications::{ws_notifications_handler, ws_traffic_handler, EventFilter, StreamState};

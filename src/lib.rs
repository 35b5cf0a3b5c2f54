//! # IMAS Transit Backend
//!
//! REST backend for a municipal bus network: staff accounts with OTP
//! login, ticketing with QR boarding, fleet and route management,
//! maintenance (incidents, tasks, spare parts), traffic observations,
//! driver emergencies, notifications and read-only analytics.
//!
//! ## Architecture
//!
//! - **domain**: Aggregates, wire enums and repository traits
//! - **application**: Services, the event bus and background jobs
//! - **infrastructure**: SeaORM persistence, crypto, mail and the prediction client
//! - **interfaces**: REST API (Swagger UI) and WebSocket event streams
//! - **server**: Process lifecycle shared by both binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export the event bus
pub use application::{create_event_bus, Event, EventBus, SharedEventBus};

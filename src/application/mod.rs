//! Application layer: use cases over the domain repositories

pub mod analytics;
pub mod emergency;
pub mod equipment;
pub mod events;
pub mod fleet;
pub mod identity;
pub mod incidents;
pub mod inventory;
pub mod jobs;
pub mod maintenance;
pub mod notifications;
pub mod scheduling;
pub mod services;
pub mod ticketing;
pub mod traffic;

pub use events::{create_event_bus, Event, EventBus, EventSubscriber, SharedEventBus};
pub use jobs::Housekeeping;
pub use services::AppServices;

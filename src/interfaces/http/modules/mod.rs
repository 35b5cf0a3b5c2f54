pub mod analytics;
pub mod buses;
pub mod emergencies;
pub mod equipment;
pub mod health;
pub mod incidents;
pub mod metrics;
pub mod notifications;
pub mod predictions;
pub mod request_id;
pub mod routes;
pub mod schedules;
pub mod spare_parts;
pub mod staff;
pub mod tasks;
pub mod tickets;
pub mod traffic;
pub mod vehicles;

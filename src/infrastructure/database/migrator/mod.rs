//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_staff;
mod m20250101_000002_create_routes;
mod m20250101_000003_create_buses;
mod m20250101_000004_create_tickets;
mod m20250101_000005_create_incidents;
mod m20250101_000006_create_maintenance_tasks;
mod m20250101_000007_create_vehicles;
mod m20250101_000008_create_bus_schedules;
mod m20250101_000009_create_spare_parts;
mod m20250101_000010_create_notifications;
mod m20250101_000011_create_traffic_data;
mod m20250101_000012_create_emergency_reports;
mod m20250101_000013_create_equipment;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_staff::Migration),
            Box::new(m20250101_000002_create_routes::Migration),
            Box::new(m20250101_000003_create_buses::Migration),
            Box::new(m20250101_000004_create_tickets::Migration),
            Box::new(m20250101_000005_create_incidents::Migration),
            Box::new(m20250101_000006_create_maintenance_tasks::Migration),
            Box::new(m20250101_000007_create_vehicles::Migration),
            Box::new(m20250101_000008_create_bus_schedules::Migration),
            Box::new(m20250101_000009_create_spare_parts::Migration),
            Box::new(m20250101_000010_create_notifications::Migration),
            Box::new(m20250101_000011_create_traffic_data::Migration),
            Box::new(m20250101_000012_create_emergency_reports::Migration),
            Box::new(m20250101_000013_create_equipment::Migration),
        ]
    }
}

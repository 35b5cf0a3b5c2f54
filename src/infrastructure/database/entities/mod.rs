//! Database entities module

pub mod bus;
pub mod emergency_report;
pub mod equipment;
pub mod incident;
pub mod incident_task;
pub mod maintenance_record;
pub mod maintenance_task;
pub mod notification;
pub mod route;
pub mod schedule;
pub mod spare_part;
pub mod staff;
pub mod stop;
pub mod ticket;
pub mod traffic_data;
pub mod vehicle;
pub mod vehicle_location;

pub use bus::Entity as Bus;
pub use emergency_report::Entity as EmergencyReport;
pub use equipment::Entity as Equipment;
pub use incident::Entity as Incident;
pub use incident_task::Entity as IncidentTask;
pub use maintenance_record::Entity as MaintenanceRecord;
pub use maintenance_task::Entity as MaintenanceTask;
pub use notification::Entity as Notification;
pub use route::Entity as Route;
pub use schedule::Entity as Schedule;
pub use spare_part::Entity as SparePart;
pub use staff::Entity as Staff;
pub use stop::Entity as Stop;
pub use ticket::Entity as Ticket;
pub use traffic_data::Entity as TrafficData;
pub use vehicle::Entity as Vehicle;
pub use vehicle_location::Entity as VehicleLocation;

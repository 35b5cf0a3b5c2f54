//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::bus::BusRepository;
use super::emergency::EmergencyReportRepository;
use super::equipment::{EquipmentRepository, MaintenanceRecordRepository};
use super::incident::{IncidentRepository, IncidentTaskRepository};
use super::maintenance::MaintenanceTaskRepository;
use super::notification::NotificationRepository;
use super::route::{RouteRepository, StopRepository};
use super::schedule::ScheduleRepository;
use super::spare_part::SparePartRepository;
use super::staff::StaffRepository;
use super::ticket::TicketRepository;
use super::traffic::TrafficDataRepository;
use super::vehicle::{VehicleLocationRepository, VehicleRepository};
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let bus = repos.buses().find_by_id(7).await?;
///     let tickets = repos.tickets().find_by_bus(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn staff(&self) -> &dyn StaffRepository;
    fn buses(&self) -> &dyn BusRepository;
    fn tickets(&self) -> &dyn TicketRepository;
    fn incidents(&self) -> &dyn IncidentRepository;
    fn incident_tasks(&self) -> &dyn IncidentTaskRepository;
    fn maintenance_tasks(&self) -> &dyn MaintenanceTaskRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn vehicle_locations(&self) -> &dyn VehicleLocationRepository;
    fn routes(&self) -> &dyn RouteRepository;
    fn stops(&self) -> &dyn StopRepository;
    fn schedules(&self) -> &dyn ScheduleRepository;
    fn spare_parts(&self) -> &dyn SparePartRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn traffic_data(&self) -> &dyn TrafficDataRepository;
    fn emergency_reports(&self) -> &dyn EmergencyReportRepository;
    fn equipment(&self) -> &dyn EquipmentRepository;
    fn maintenance_records(&self) -> &dyn MaintenanceRecordRepository;
}

//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::bus::BusRepository;
use crate::domain::emergency::EmergencyReportRepository;
use crate::domain::equipment::{EquipmentRepository, MaintenanceRecordRepository};
use crate::domain::incident::{IncidentRepository, IncidentTaskRepository};
use crate::domain::maintenance::MaintenanceTaskRepository;
use crate::domain::notification::NotificationRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::route::{RouteRepository, StopRepository};
use crate::domain::schedule::ScheduleRepository;
use crate::domain::spare_part::SparePartRepository;
use crate::domain::staff::StaffRepository;
use crate::domain::ticket::TicketRepository;
use crate::domain::traffic::TrafficDataRepository;
use crate::domain::vehicle::{VehicleLocationRepository, VehicleRepository};

use super::bus_repository::SeaOrmBusRepository;
use super::emergency_report_repository::SeaOrmEmergencyReportRepository;
use super::equipment_repository::{SeaOrmEquipmentRepository, SeaOrmMaintenanceRecordRepository};
use super::incident_repository::{SeaOrmIncidentRepository, SeaOrmIncidentTaskRepository};
use super::maintenance_task_repository::SeaOrmMaintenanceTaskRepository;
use super::notification_repository::SeaOrmNotificationRepository;
use super::route_repository::{SeaOrmRouteRepository, SeaOrmStopRepository};
use super::schedule_repository::SeaOrmScheduleRepository;
use super::spare_part_repository::SeaOrmSparePartRepository;
use super::staff_repository::SeaOrmStaffRepository;
use super::ticket_repository::SeaOrmTicketRepository;
use super::traffic_data_repository::SeaOrmTrafficDataRepository;
use super::vehicle_repository::{SeaOrmVehicleLocationRepository, SeaOrmVehicleRepository};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let bus = repos.buses().find_by_id(7).await?;
/// let taken = repos.tickets().find_by_bus(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    staff: SeaOrmStaffRepository,
    buses: SeaOrmBusRepository,
    tickets: SeaOrmTicketRepository,
    incidents: SeaOrmIncidentRepository,
    incident_tasks: SeaOrmIncidentTaskRepository,
    maintenance_tasks: SeaOrmMaintenanceTaskRepository,
    vehicles: SeaOrmVehicleRepository,
    vehicle_locations: SeaOrmVehicleLocationRepository,
    routes: SeaOrmRouteRepository,
    stops: SeaOrmStopRepository,
    schedules: SeaOrmScheduleRepository,
    spare_parts: SeaOrmSparePartRepository,
    notifications: SeaOrmNotificationRepository,
    traffic_data: SeaOrmTrafficDataRepository,
    emergency_reports: SeaOrmEmergencyReportRepository,
    equipment: SeaOrmEquipmentRepository,
    maintenance_records: SeaOrmMaintenanceRecordRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            staff: SeaOrmStaffRepository::new(db.clone()),
            buses: SeaOrmBusRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db.clone()),
            incidents: SeaOrmIncidentRepository::new(db.clone()),
            incident_tasks: SeaOrmIncidentTaskRepository::new(db.clone()),
            maintenance_tasks: SeaOrmMaintenanceTaskRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            vehicle_locations: SeaOrmVehicleLocationRepository::new(db.clone()),
            routes: SeaOrmRouteRepository::new(db.clone()),
            stops: SeaOrmStopRepository::new(db.clone()),
            schedules: SeaOrmScheduleRepository::new(db.clone()),
            spare_parts: SeaOrmSparePartRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db.clone()),
            traffic_data: SeaOrmTrafficDataRepository::new(db.clone()),
            emergency_reports: SeaOrmEmergencyReportRepository::new(db.clone()),
            equipment: SeaOrmEquipmentRepository::new(db.clone()),
            maintenance_records: SeaOrmMaintenanceRecordRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn staff(&self) -> &dyn StaffRepository {
        &self.staff
    }

    fn buses(&self) -> &dyn BusRepository {
        &self.buses
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }

    fn incidents(&self) -> &dyn IncidentRepository {
        &self.incidents
    }

    fn incident_tasks(&self) -> &dyn IncidentTaskRepository {
        &self.incident_tasks
    }

    fn maintenance_tasks(&self) -> &dyn MaintenanceTaskRepository {
        &self.maintenance_tasks
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn vehicle_locations(&self) -> &dyn VehicleLocationRepository {
        &self.vehicle_locations
    }

    fn routes(&self) -> &dyn RouteRepository {
        &self.routes
    }

    fn stops(&self) -> &dyn StopRepository {
        &self.stops
    }

    fn schedules(&self) -> &dyn ScheduleRepository {
        &self.schedules
    }

    fn spare_parts(&self) -> &dyn SparePartRepository {
        &self.spare_parts
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }

    fn traffic_data(&self) -> &dyn TrafficDataRepository {
        &self.traffic_data
    }

    fn emergency_reports(&self) -> &dyn EmergencyReportRepository {
        &self.emergency_reports
    }

    fn equipment(&self) -> &dyn EquipmentRepository {
        &self.equipment
    }

    fn maintenance_records(&self) -> &dyn MaintenanceRecordRepository {
        &self.maintenance_records
    }
}

//! Service container shared by the HTTP layer and background jobs

use std::sync::Arc;

use crate::application::analytics::AnalyticsService;
use crate::application::emergency::EmergencyService;
use crate::application::equipment::EquipmentService;
use crate::application::events::SharedEventBus;
use crate::application::fleet::{BusService, VehicleService};
use crate::application::identity::StaffService;
use crate::application::incidents::IncidentService;
use crate::application::inventory::InventoryService;
use crate::application::jobs::Housekeeping;
use crate::application::maintenance::MaintenanceService;
use crate::application::notifications::NotificationService;
use crate::application::scheduling::{RouteService, ScheduleService};
use crate::application::ticketing::TicketService;
use crate::application::traffic::TrafficService;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{Mailer, PredictionClient};

#[derive(Clone)]
pub struct AppServices {
    pub repos: Arc<dyn RepositoryProvider>,
    pub event_bus: SharedEventBus,
    pub staff: Arc<StaffService>,
    pub notifications: Arc<NotificationService>,
    pub tickets: Arc<TicketService>,
    pub buses: Arc<BusService>,
    pub vehicles: Arc<VehicleService>,
    pub routes: Arc<RouteService>,
    pub schedules: Arc<ScheduleService>,
    pub incidents: Arc<IncidentService>,
    pub maintenance: Arc<MaintenanceService>,
    pub equipment: Arc<EquipmentService>,
    pub inventory: Arc<InventoryService>,
    pub traffic: Arc<TrafficService>,
    pub emergencies: Arc<EmergencyService>,
    pub analytics: Arc<AnalyticsService>,
    pub prediction: Arc<PredictionClient>,
}

impl AppServices {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        mailer: Arc<dyn Mailer>,
        prediction: Arc<PredictionClient>,
        event_bus: SharedEventBus,
        config: &AppConfig,
    ) -> Self {
        let notifications = Arc::new(NotificationService::new(repos.clone(), event_bus.clone()));

        Self {
            staff: Arc::new(StaffService::new(repos.clone(), mailer.clone(), &config.security)),
            tickets: Arc::new(TicketService::new(
                repos.clone(),
                notifications.clone(),
                event_bus.clone(),
            )),
            buses: Arc::new(BusService::new(repos.clone(), event_bus.clone())),
            vehicles: Arc::new(VehicleService::new(repos.clone())),
            routes: Arc::new(RouteService::new(repos.clone())),
            schedules: Arc::new(ScheduleService::new(repos.clone(), mailer.clone())),
            incidents: Arc::new(IncidentService::new(
                repos.clone(),
                mailer.clone(),
                event_bus.clone(),
            )),
            maintenance: Arc::new(MaintenanceService::new(
                repos.clone(),
                notifications.clone(),
                mailer,
                event_bus.clone(),
            )),
            equipment: Arc::new(EquipmentService::new(repos.clone())),
            inventory: Arc::new(InventoryService::new(repos.clone())),
            traffic: Arc::new(TrafficService::new(repos.clone(), event_bus.clone())),
            emergencies: Arc::new(EmergencyService::new(repos.clone(), event_bus.clone())),
            analytics: Arc::new(AnalyticsService::new(repos.clone())),
            notifications,
            prediction,
            event_bus,
            repos,
        }
    }

    pub fn housekeeping(&self, config: &AppConfig) -> Arc<Housekeeping> {
        Arc::new(Housekeeping::new(
            self.traffic.clone(),
            self.notifications.clone(),
            self.staff.clone(),
            config.jobs.clone(),
        ))
    }
}

//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AppServices;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::metrics::http_metrics_middleware;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::ws::{ws_notifications_handler, ws_traffic_handler, StreamState};

use super::modules::{
    analytics, buses, emergencies, equipment, health, incidents, metrics, notifications,
    predictions, routes, schedules, spare_parts, staff, tasks, tickets, traffic, vehicles,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/staff/verify-otp"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Staff
        staff::register,
        staff::login,
        staff::verify_otp,
        staff::resend_otp,
        staff::check_email,
        staff::forgot_password,
        staff::reset_password,
        staff::list_staff,
        staff::me,
        staff::get_staff,
        staff::create_staff,
        staff::create_analyst,
        staff::list_analysts,
        staff::list_active_analysts,
        staff::update_staff,
        staff::delete_staff,
        // Tickets
        tickets::validate_seat,
        tickets::trip_tickets,
        tickets::taken_seats,
        tickets::create_ticket,
        tickets::list_tickets,
        tickets::get_ticket,
        tickets::get_by_number,
        tickets::for_passenger,
        tickets::for_bus,
        tickets::generate_qr,
        tickets::qr_code,
        tickets::scan_qr,
        tickets::calculate_price,
        tickets::send_departure_reminders,
        tickets::driver_trip_count,
        // Buses
        buses::list_buses,
        buses::get_bus,
        buses::by_driver,
        buses::create_bus,
        buses::update_bus,
        buses::delete_bus,
        buses::update_location,
        buses::set_accident,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        vehicles::by_status,
        vehicles::update_status,
        vehicles::active,
        vehicles::available,
        vehicles::by_route,
        vehicles::assign_route,
        vehicles::unassign_route,
        vehicles::maintenance_due,
        vehicles::complete_maintenance,
        vehicles::report_breakdown,
        vehicles::resolve_breakdown,
        vehicles::record_location,
        vehicles::latest_location,
        vehicles::location_history,
        vehicles::fleet_statistics,
        vehicles::by_number,
        vehicles::by_plate,
        vehicles::in_radius,
        vehicles::start_trip,
        vehicles::end_trip,
        vehicles::start_service,
        vehicles::end_service,
        vehicles::activate,
        vehicles::deactivate,
        // Routes
        routes::list_routes,
        routes::get_route,
        routes::create_route,
        routes::update_route,
        routes::delete_route,
        routes::list_stops,
        routes::add_stop,
        routes::remove_stop,
        // Schedules
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        schedules::by_bus,
        schedules::by_day,
        // Incidents
        incidents::report_incident,
        incidents::list_incidents,
        incidents::get_incident,
        incidents::update_incident,
        incidents::delete_incident,
        incidents::latest_for_bus,
        incidents::recent_incidents,
        incidents::technician_history,
        incidents::assign,
        incidents::assign_technician,
        incidents::incident_tasks,
        incidents::update_status,
        incidents::merge_details,
        incidents::frequency,
        incidents::severity_distribution,
        incidents::trends,
        incidents::reports,
        incidents::stats,
        // Tasks
        tasks::create_task,
        tasks::list_tasks,
        tasks::get_task,
        tasks::update_task,
        tasks::delete_task,
        tasks::by_status,
        tasks::by_statuses,
        tasks::by_priority,
        tasks::by_technician,
        tasks::technician_stats,
        tasks::overdue,
        tasks::update_status,
        tasks::set_technician,
        tasks::update_completion,
        tasks::add_skill,
        tasks::add_part,
        // Spare parts
        spare_parts::list_parts,
        spare_parts::get_part,
        spare_parts::by_part_number,
        spare_parts::create_part,
        spare_parts::update_part,
        spare_parts::delete_part,
        spare_parts::by_category,
        spare_parts::categories,
        spare_parts::search,
        spare_parts::low_stock,
        spare_parts::out_of_stock,
        spare_parts::decrease_stock,
        spare_parts::increase_stock,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::update_status,
        equipment::maintenance_history,
        equipment::perform_maintenance,
        equipment::reliability,
        equipment::equipment_tasks,
        equipment::search,
        equipment::by_status,
        equipment::need_maintenance,
        equipment::stats_by_status,
        equipment::stats_by_location,
        // Notifications
        notifications::for_user,
        notifications::unread_for_user,
        notifications::unread_count,
        notifications::mark_all_read,
        notifications::mark_read,
        notifications::driver_notifications,
        notifications::driver_new,
        notifications::notify_driver,
        notifications::driver_read_all,
        notifications::passenger_notifications,
        notifications::passenger_new,
        notifications::notify_passenger,
        notifications::passenger_read_all,
        // Traffic
        traffic::record_traffic,
        traffic::record_batch,
        traffic::list_traffic,
        traffic::get_traffic,
        traffic::update_traffic,
        traffic::delete_traffic,
        traffic::nearby,
        traffic::current_level,
        traffic::search,
        traffic::hotspots,
        traffic::hourly,
        traffic::rush_hour,
        traffic::summary,
        // Emergencies
        emergencies::report,
        emergencies::list_reports,
        emergencies::get_report,
        emergencies::by_driver,
        emergencies::recent_by_driver,
        emergencies::update_status,
        emergencies::delete_report,
        emergencies::high_priority,
        // Analytics
        analytics::system_overview,
        analytics::passenger_statistics,
        analytics::financial_statistics,
        analytics::bus_performance,
        analytics::driver_revenue,
        // Predictions
        predictions::predict_maintenance,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<traffic::TrafficDataDto>,
            health::HealthResponse,
            health::ComponentHealth,
            // Staff
            staff::StaffDto,
            staff::RegisterRequest,
            staff::LoginRequest,
            staff::LoginResponse,
            staff::VerifyOtpRequest,
            staff::EmailRequest,
            staff::ForgotPasswordRequest,
            staff::ResetPasswordRequest,
            staff::UpdateStaffRequest,
            staff::EmailExistsResponse,
            staff::MessageResponse,
            // Tickets
            tickets::TicketDto,
            tickets::SeatValidationRequest,
            tickets::TripRequest,
            tickets::CreateTicketRequest,
            tickets::ScanRequest,
            tickets::PriceRequest,
            tickets::ReminderRequest,
            tickets::SeatCheckResponse,
            tickets::IssuedTicketResponse,
            tickets::QrCodeResponse,
            tickets::ScanResponse,
            tickets::PriceQuoteDto,
            tickets::ReminderResponse,
            tickets::TripCountResponse,
            // Fleet
            buses::BusDto,
            buses::BusRequest,
            buses::LocationRequest,
            buses::AccidentRequest,
            vehicles::VehicleDto,
            vehicles::VehicleRequest,
            vehicles::VehicleStatusRequest,
            vehicles::LocationFixRequest,
            vehicles::VehicleLocationDto,
            vehicles::FleetStatisticsDto,
            // Routes & schedules
            routes::RouteDto,
            routes::RouteRequest,
            routes::StopDto,
            routes::StopRequest,
            schedules::ScheduleDto,
            schedules::ScheduleRequest,
            // Maintenance
            incidents::IncidentDto,
            incidents::IncidentTaskDto,
            incidents::IncidentRequest,
            incidents::AssignRequest,
            incidents::AssignTechnicianRequest,
            incidents::StatusRequest,
            incidents::IncidentStatsDto,
            incidents::IncidentReportDto,
            tasks::TaskDto,
            tasks::CreateTaskRequest,
            tasks::UpdateTaskRequest,
            tasks::TaskStatusRequest,
            tasks::TechnicianRequest,
            tasks::CompletionRequest,
            tasks::SkillRequest,
            tasks::PartRequest,
            tasks::TechnicianStatsDto,
            spare_parts::SparePartDto,
            spare_parts::SparePartRequest,
            spare_parts::StockChangeRequest,
            equipment::EquipmentDto,
            equipment::EquipmentRequest,
            equipment::EquipmentStatusRequest,
            equipment::MaintenanceRecordDto,
            equipment::MaintenanceRequest,
            equipment::ReliabilityDto,
            // Notifications
            notifications::NotificationDto,
            notifications::NotificationRequest,
            notifications::UnreadCountDto,
            notifications::MarkedReadDto,
            // Traffic
            traffic::TrafficDataDto,
            traffic::TrafficRequest,
            traffic::TrafficSearchRequest,
            traffic::CurrentLevelDto,
            traffic::HotspotDto,
            traffic::HourlyStatDto,
            traffic::TrafficSummaryDto,
            // Emergencies
            emergencies::Coordinates,
            emergencies::EmergencyReportDto,
            emergencies::EmergencyRequest,
            emergencies::EmergencyStatusRequest,
            // Analytics
            analytics::SystemOverviewDto,
            analytics::CustomerStatsDto,
            analytics::PassengerStatisticsDto,
            analytics::FinancialStatisticsDto,
            analytics::BusPerformanceDto,
            analytics::DriverRevenueDto,
            // Predictions
            predictions::PredictionRequest,
            predictions::UpstreamErrorDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Staff", description = "Staff accounts: registration, OTP login, password reset, administration"),
        (name = "Tickets", description = "Ticket issuing, seat checks, QR codes and departure reminders"),
        (name = "Buses", description = "Buses in service: driver, capacity, position and accident flag"),
        (name = "Vehicles", description = "Fleet records, route assignment, maintenance windows and GPS fixes"),
        (name = "Routes", description = "Routes and their ordered stops"),
        (name = "Schedules", description = "Weekly bus schedules"),
        (name = "Incidents", description = "Incident reporting, assignment and statistics"),
        (name = "Tasks", description = "Maintenance tasks"),
        (name = "Spare parts", description = "Spare-part inventory"),
        (name = "Equipment", description = "Equipment register, service history and maintenance due"),
        (name = "Notifications", description = "Per-recipient notifications"),
        (name = "Traffic", description = "Traffic observations and aggregates"),
        (name = "Emergencies", description = "Driver emergency reports"),
        (name = "Analytics", description = "Read-only dashboards"),
        (name = "Predictions", description = "Predictive-maintenance proxy"),
    ),
    info(
        title = "IMAS Transit API",
        version = "1.0.0",
        description = "REST API for the municipal bus network: ticketing, fleet, maintenance, traffic and analytics",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

fn staff_routes(services: &AppServices) -> Router {
    let state = staff::StaffHandlerState {
        staff: services.staff.clone(),
    };
    let auth_state = AuthState {
        jwt_config: services.staff.jwt_config().clone(),
    };

    // Public authentication flow
    let public = Router::new()
        .route("/register", post(staff::register))
        .route("/login", post(staff::login))
        .route("/verify-otp", post(staff::verify_otp))
        .route("/resend-otp", post(staff::resend_otp))
        .route("/check-email", post(staff::check_email))
        .route("/forgot-password", post(staff::forgot_password))
        .route("/reset-password", post(staff::reset_password))
        .with_state(state.clone());

    // Any authenticated staff member
    let protected = Router::new()
        .route("/", get(staff::list_staff))
        .route("/me", get(staff::me))
        .route("/analysts", get(staff::list_analysts))
        .route("/analysts/active", get(staff::list_active_analysts))
        .route("/{id}", get(staff::get_staff))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    // ADMIN only; auth runs first and attaches the caller
    let admin = Router::new()
        .route("/", post(staff::create_staff))
        .route("/create-analyst", post(staff::create_analyst))
        .route(
            "/{id}",
            put(staff::update_staff).delete(staff::delete_staff),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state);

    public.merge(protected).merge(admin)
}

fn ticket_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::create_ticket))
        .route("/validate-seat", post(tickets::validate_seat))
        .route("/scan-qr", post(tickets::scan_qr))
        .route("/calculate-price", post(tickets::calculate_price))
        .route("/send-departure-reminders", post(tickets::send_departure_reminders))
        .route("/number/{ticket_number}", get(tickets::get_by_number))
        .route("/passenger/{passenger_id}", get(tickets::for_passenger))
        .route("/bus/{bus_id}", get(tickets::for_bus))
        .route("/bus/{bus_id}/departure/specific", post(tickets::trip_tickets))
        .route("/bus/{bus_id}/taken-seats", post(tickets::taken_seats))
        .route("/trips/driver/{driver_id}/count", get(tickets::driver_trip_count))
        .route("/{id}", get(tickets::get_ticket))
        .route("/{id}/generate-qr", post(tickets::generate_qr))
        .route("/{id}/qr-code", get(tickets::qr_code))
        .with_state(tickets::TicketHandlerState {
            tickets: services.tickets.clone(),
        })
}

fn bus_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(buses::list_buses).post(buses::create_bus))
        .route("/driver/{driver_id}", get(buses::by_driver))
        .route(
            "/{id}",
            get(buses::get_bus)
                .put(buses::update_bus)
                .delete(buses::delete_bus),
        )
        .route("/{id}/location", patch(buses::update_location))
        .route("/{id}/accident", patch(buses::set_accident))
        .with_state(buses::BusHandlerState {
            buses: services.buses.clone(),
        })
}

fn vehicle_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route("/active", get(vehicles::active))
        .route("/available", get(vehicles::available))
        .route("/maintenance/due", get(vehicles::maintenance_due))
        .route("/statistics/fleet", get(vehicles::fleet_statistics))
        .route("/status/{status}", get(vehicles::by_status))
        .route("/route/{route_id}", get(vehicles::by_route))
        .route("/by-number/{vehicle_number}", get(vehicles::by_number))
        .route("/by-plate/{license_plate}", get(vehicles::by_plate))
        .route("/in-radius", get(vehicles::in_radius))
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/{id}/status", patch(vehicles::update_status))
        .route("/{id}/assign-route/{route_id}", patch(vehicles::assign_route))
        .route("/{id}/unassign-route", patch(vehicles::unassign_route))
        .route("/{id}/maintenance/complete", patch(vehicles::complete_maintenance))
        .route("/{id}/breakdown/report", patch(vehicles::report_breakdown))
        .route("/{id}/breakdown/resolve", patch(vehicles::resolve_breakdown))
        .route("/{id}/trip/start", patch(vehicles::start_trip))
        .route("/{id}/trip/end", patch(vehicles::end_trip))
        .route("/{id}/service/start", patch(vehicles::start_service))
        .route("/{id}/service/end", patch(vehicles::end_service))
        .route("/{id}/activate", patch(vehicles::activate))
        .route("/{id}/deactivate", patch(vehicles::deactivate))
        .route(
            "/{id}/location",
            get(vehicles::latest_location).post(vehicles::record_location),
        )
        .route("/{id}/location/history", get(vehicles::location_history))
        .with_state(vehicles::VehicleHandlerState {
            vehicles: services.vehicles.clone(),
        })
}

fn route_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(routes::list_routes).post(routes::create_route))
        .route(
            "/{id}",
            get(routes::get_route)
                .put(routes::update_route)
                .delete(routes::delete_route),
        )
        .route("/{id}/stops", get(routes::list_stops).post(routes::add_stop))
        .route("/{id}/stops/{stop_id}", axum::routing::delete(routes::remove_stop))
        .with_state(routes::RouteHandlerState {
            routes: services.routes.clone(),
        })
}

fn schedule_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(schedules::list_schedules).post(schedules::create_schedule))
        .route("/bus/{bus_id}", get(schedules::by_bus))
        .route("/day/{day}", get(schedules::by_day))
        .route(
            "/{id}",
            get(schedules::get_schedule)
                .put(schedules::update_schedule)
                .delete(schedules::delete_schedule),
        )
        .with_state(schedules::ScheduleHandlerState {
            schedules: services.schedules.clone(),
        })
}

fn incident_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(incidents::list_incidents).post(incidents::report_incident))
        .route("/recent", get(incidents::recent_incidents))
        .route("/frequency", get(incidents::frequency))
        .route("/severity", get(incidents::severity_distribution))
        .route("/trends", get(incidents::trends))
        .route("/reports", get(incidents::reports))
        .route("/stats", get(incidents::stats))
        .route("/by-bus/{bus_id}", get(incidents::latest_for_bus))
        .route("/technician/{id}/history", get(incidents::technician_history))
        .route(
            "/{id}",
            get(incidents::get_incident)
                .put(incidents::update_incident)
                .delete(incidents::delete_incident),
        )
        .route("/{id}/assign", patch(incidents::assign))
        .route("/{id}/assign-technician", patch(incidents::assign_technician))
        .route("/{id}/tasks", get(incidents::incident_tasks))
        .route("/{id}/status", patch(incidents::update_status))
        .route("/{id}/details", patch(incidents::merge_details))
        .with_state(incidents::IncidentHandlerState {
            incidents: services.incidents.clone(),
        })
}

fn task_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/overdue", get(tasks::overdue))
        .route("/by-status/{status}", get(tasks::by_status))
        .route("/by-statuses/{statuses}", get(tasks::by_statuses))
        .route("/by-priority/{priority}", get(tasks::by_priority))
        .route("/by-technician/{id}", get(tasks::by_technician))
        .route("/by-technician/{id}/stats", get(tasks::technician_stats))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/{id}/status", patch(tasks::update_status))
        .route("/{id}/technician", patch(tasks::set_technician))
        .route("/{id}/completion", patch(tasks::update_completion))
        .route("/{id}/skills", post(tasks::add_skill))
        .route("/{id}/parts", post(tasks::add_part))
        .with_state(tasks::TaskHandlerState {
            maintenance: services.maintenance.clone(),
        })
}

fn spare_part_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(spare_parts::list_parts).post(spare_parts::create_part))
        .route("/categories", get(spare_parts::categories))
        .route("/search", get(spare_parts::search))
        .route("/low-stock", get(spare_parts::low_stock))
        .route("/out-of-stock", get(spare_parts::out_of_stock))
        .route("/part/{part_number}", get(spare_parts::by_part_number))
        .route("/category/{category}", get(spare_parts::by_category))
        .route(
            "/{id}",
            get(spare_parts::get_part)
                .put(spare_parts::update_part)
                .delete(spare_parts::delete_part),
        )
        .route("/{id}/decrease-stock", patch(spare_parts::decrease_stock))
        .route("/{id}/increase-stock", patch(spare_parts::increase_stock))
        .with_state(spare_parts::SparePartHandlerState {
            inventory: services.inventory.clone(),
        })
}

fn equipment_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(equipment::list_equipment).post(equipment::create_equipment))
        .route("/search", get(equipment::search))
        .route("/by-status/{status}", get(equipment::by_status))
        .route("/need-maintenance/{days}", get(equipment::need_maintenance))
        .route("/stats/by-status", get(equipment::stats_by_status))
        .route("/stats/by-location", get(equipment::stats_by_location))
        .route(
            "/{id}",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route(
            "/{id}/status",
            put(equipment::update_status).patch(equipment::update_status),
        )
        .route("/{id}/maintenance-history", get(equipment::maintenance_history))
        .route("/{id}/maintenance", post(equipment::perform_maintenance))
        .route("/{id}/reliability", get(equipment::reliability))
        .route("/{id}/tasks", get(equipment::equipment_tasks))
        .with_state(equipment::EquipmentHandlerState {
            equipment: services.equipment.clone(),
        })
}

fn notification_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/user/{user_id}", get(notifications::for_user))
        .route("/user/{user_id}/unread", get(notifications::unread_for_user))
        .route("/user/{user_id}/unread/count", get(notifications::unread_count))
        .route("/user/{user_id}/read-all", put(notifications::mark_all_read))
        .route("/{id}/read", put(notifications::mark_read))
        .route(
            "/driver/{id}",
            get(notifications::driver_notifications).post(notifications::notify_driver),
        )
        .route("/driver/{id}/new", get(notifications::driver_new))
        .route("/driver/{id}/read-all", put(notifications::driver_read_all))
        .route(
            "/passenger/{id}",
            get(notifications::passenger_notifications).post(notifications::notify_passenger),
        )
        .route("/passenger/{id}/new", get(notifications::passenger_new))
        .route("/passenger/{id}/read-all", put(notifications::passenger_read_all))
        .with_state(notifications::NotificationHandlerState {
            notifications: services.notifications.clone(),
        })
}

fn traffic_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(traffic::list_traffic).post(traffic::record_traffic))
        .route("/batch", post(traffic::record_batch))
        .route("/nearby", get(traffic::nearby))
        .route("/current-level", get(traffic::current_level))
        .route("/search", post(traffic::search))
        .route("/hotspots", get(traffic::hotspots))
        .route("/stats/hourly", get(traffic::hourly))
        .route("/rush-hour", get(traffic::rush_hour))
        .route("/summary", get(traffic::summary))
        .route(
            "/{id}",
            get(traffic::get_traffic)
                .put(traffic::update_traffic)
                .delete(traffic::delete_traffic),
        )
        .with_state(traffic::TrafficHandlerState {
            traffic: services.traffic.clone(),
        })
}

fn emergency_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(emergencies::list_reports).post(emergencies::report))
        .route("/high-priority", get(emergencies::high_priority))
        .route("/driver/{driver_id}", get(emergencies::by_driver))
        .route("/driver/{driver_id}/recent", get(emergencies::recent_by_driver))
        .route(
            "/{id}",
            get(emergencies::get_report).delete(emergencies::delete_report),
        )
        .route("/{id}/status", put(emergencies::update_status))
        .with_state(emergencies::EmergencyHandlerState {
            emergencies: services.emergencies.clone(),
        })
}

fn analytics_routes(services: &AppServices) -> Router {
    Router::new()
        .route("/system-overview", get(analytics::system_overview))
        .route("/passenger-statistics", get(analytics::passenger_statistics))
        .route("/financial-statistics/{period}", get(analytics::financial_statistics))
        .route("/bus-performance/{period}", get(analytics::bus_performance))
        .route("/driver-revenue/{period}", get(analytics::driver_revenue))
        .with_state(analytics::AnalyticsState {
            analytics: services.analytics.clone(),
        })
}

/// Create the API router with all routes
pub fn create_api_router(
    services: &AppServices,
    db: DatabaseConnection,
    metrics_handle: PrometheusHandle,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            event_bus: services.event_bus.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: metrics_handle,
        });

    // Event streams (no auth for WebSocket upgrade)
    let stream_routes = Router::new()
        .route("/notifications", get(ws_notifications_handler))
        .route("/traffic-data", get(ws_traffic_handler))
        .with_state(StreamState {
            event_bus: services.event_bus.clone(),
        });

    let prediction_routes = Router::new()
        .route("/maintenance", post(predictions::predict_maintenance))
        .with_state(predictions::PredictionState {
            client: services.prediction.clone(),
            equipment: services.equipment.clone(),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health & metrics
        .merge(health_routes)
        .merge(metrics_routes)
        // Resources
        .nest("/api/staff", staff_routes(services))
        .nest("/api/tickets", ticket_routes(services))
        .nest("/api/buses", bus_routes(services))
        .nest("/api/vehicles", vehicle_routes(services))
        .nest("/api/routes", route_routes(services))
        .nest("/api/schedule-buses", schedule_routes(services))
        .nest("/api/incidents", incident_routes(services))
        .nest("/api/tasks", task_routes(services))
        .nest("/api/spare-parts", spare_part_routes(services))
        .nest("/api/equipments", equipment_routes(services))
        .nest("/api/notifications", notification_routes(services))
        .nest("/api/traffic-data", traffic_routes(services))
        .nest("/api/emergency-reports", emergency_routes(services))
        .nest("/api/analytics", analytics_routes(services))
        .nest("/api/predictions", prediction_routes)
        // WebSocket streams
        .nest("/ws", stream_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::create_event_bus;
    use crate::config::AppConfig;
    use crate::domain::bus::Bus;
    use crate::domain::staff::StaffRole;
    use crate::infrastructure::{LogMailer, PredictionClient, SeaOrmRepositoryProvider};
    use crate::test_support::{database, seed_staff, TEST_PASSWORD};

    async fn app() -> (Router, AppServices) {
        let db = database().await;
        let config = AppConfig::default();
        let services = AppServices::new(
            Arc::new(SeaOrmRepositoryProvider::new(db.clone())),
            Arc::new(LogMailer::new(&config.mail)),
            Arc::new(PredictionClient::new(&config.prediction).unwrap()),
            create_event_bus(),
            &config,
        );
        let handle = PrometheusBuilder::new().build_recorder().handle();
        (create_api_router(&services, db, handle), services)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    /// Status plus the JSON body, `Null` when there is none
    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn token_for(services: &AppServices, staff_id: i64, email: &str, role: StaffRole) -> String {
        crate::infrastructure::crypto::create_token(
            staff_id,
            email,
            &role.to_string(),
            services.staff.jwt_config(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn health_and_openapi_are_public() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(body_json(response).await["status"], "ok");

        let response = app
            .oneshot(Request::get("/api-doc/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert!(doc["paths"]["/api/tickets/scan-qr"].is_object());
        assert!(doc["paths"]["/api/traffic-data/hotspots"].is_object());
        assert!(doc["paths"]["/api/equipments/{id}/maintenance"]["post"].is_object());
        assert!(doc["paths"]["/api/vehicles/{id}/trip/start"]["patch"].is_object());
        assert!(doc["paths"]["/api/vehicles/in-radius"].is_object());
    }

    #[tokio::test]
    async fn staff_listing_requires_a_token() {
        let (app, services) = app().await;
        let admin = seed_staff(services.repos.as_ref(), "admin@imas.cd", StaffRole::Admin).await;

        let response = app
            .clone()
            .oneshot(Request::get("/api/staff").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let token = token_for(&services, admin.id, &admin.email, StaffRole::Admin);
        let response = app
            .oneshot(
                Request::get("/api/staff/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["email"], "admin@imas.cd");
    }

    #[tokio::test]
    async fn staff_creation_is_admin_only() {
        let (app, services) = app().await;
        let driver = seed_staff(services.repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let token = token_for(&services, driver.id, &driver.email, StaffRole::Driver);

        let mut request = json_request(
            "POST",
            "/api/staff",
            json!({
                "firstName": "New",
                "lastName": "Analyst",
                "email": "new@imas.cd",
                "password": TEST_PASSWORD,
                "role": "ANALYST"
            }),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn public_login_is_not_behind_auth() {
        let (app, services) = app().await;
        seed_staff(services.repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/staff/login",
                json!({ "email": "tech@imas.cd", "password": TEST_PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn static_segments_win_over_ids() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(Request::get("/api/incidents/recent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::get("/api/spare-parts/low-stock").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/api/incidents/9999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traffic_round_trip_through_the_router() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/traffic-data",
                json!({ "latitude": -4.32, "longitude": 15.31, "trafficLevel": 4 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(Request::get("/api/traffic-data?page=1&size=10").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["total"], 1);
    }

    #[tokio::test]
    async fn unknown_routes_are_404() {
        let (app, _) = app().await;
        let response = app
            .oneshot(Request::get("/api/depots/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deletes_answer_404_then_204() {
        let (app, _) = app().await;

        let (status, _) = call(&app, empty("DELETE", "/api/equipments/4242")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(
            &app,
            json_request("POST", "/api/equipments", json!({ "name": "Tyre changer" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(&app, empty("DELETE", &format!("/api/equipments/{}", id))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
        let (status, _) = call(&app, empty("GET", &format!("/api/equipments/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, empty("DELETE", "/api/incidents/INC-missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn incident_round_trip_and_bad_status() {
        let (app, _) = app().await;

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/incidents",
                json!({
                    "incidentType": "BRAKE_FAILURE",
                    "location": "Boulevard du 30 Juin",
                    "severity": "HIGH"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["incidentId"].as_str().unwrap().to_string();

        let (status, body) = call(&app, empty("GET", &format!("/api/incidents/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["incidentType"], "BRAKE_FAILURE");
        assert_eq!(body["data"]["location"], "Boulevard du 30 Juin");

        let (status, body) = call(
            &app,
            json_request("PATCH", &format!("/api/incidents/{}/status", id), json!({ "status": "BOGUS" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = call(&app, empty("DELETE", &format!("/api/incidents/{}", id))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn second_booking_of_a_seat_is_409_with_code() {
        let (app, services) = app().await;
        let rider = seed_staff(services.repos.as_ref(), "rider@imas.cd", StaffRole::Passenger).await;
        let bus = services.repos.buses().create(Bus::new("B-7", 40)).await.unwrap();
        let booking = json!({
            "busId": bus.id,
            "passengerId": rider.id,
            "firstName": "Jean",
            "lastName": "Kabila",
            "seatNumber": "12",
            "origin": "Gare Centrale",
            "destination": "Matete",
            "departureTime": "2030-01-15T08:00:00Z"
        });

        let (status, body) = call(&app, json_request("POST", "/api/tickets", booking.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let ticket = &body["data"]["ticket"];
        let id = ticket["id"].as_i64().unwrap();
        let number = ticket["ticketNumber"].as_str().unwrap().to_string();

        let (status, body) = call(&app, empty("GET", &format!("/api/tickets/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["ticketNumber"], number.as_str());
        assert_eq!(body["data"]["seatNumber"], "12");

        let (status, body) = call(&app, json_request("POST", "/api/tickets", booking)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errorCode"], "SEAT_ALREADY_TAKEN");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn repeated_driver_notice_is_204() {
        let (app, services) = app().await;
        let driver = seed_staff(services.repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let uri = format!("/api/notifications/driver/{}", driver.id);
        let notice = json!({ "message": "Report to depot B", "type": "info" });

        let (status, body) = call(&app, json_request("POST", &uri, notice.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = call(&app, json_request("POST", &uri, notice)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn equipment_service_history_through_the_router() {
        let (app, _) = app().await;

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/equipments",
                json!({ "name": "Bus lift", "serialNumber": "SN-77", "location": "Depot A" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = call(
            &app,
            json_request("POST", "/api/equipments", json!({ "name": "Other lift", "serialNumber": "SN-77" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = call(
            &app,
            json_request("PUT", &format!("/api/equipments/{}/status", id), json!({ "status": "DEFECTIVE" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "DEFECTIVE");

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                &format!("/api/equipments/{}/maintenance", id),
                json!({
                    "startDate": "2025-03-01",
                    "endDate": "2025-03-02",
                    "priority": "HIGH",
                    "description": "Hydraulic seals replaced"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["equipmentId"], id);

        let (_, body) = call(&app, empty("GET", &format!("/api/equipments/{}", id))).await;
        assert_eq!(body["data"]["status"], "OPERATIONAL");
        assert_eq!(body["data"]["lastMaintenanceDate"], "2025-03-02");

        let (status, body) = call(
            &app,
            empty("GET", &format!("/api/equipments/{}/maintenance-history?from=2025-03-01&to=2025-03-31", id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (status, _) = call(
            &app,
            empty("GET", &format!("/api/equipments/{}/maintenance-history?from=soon", id)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, empty("GET", "/api/equipments/4242/maintenance-history")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&app, empty("GET", "/api/equipments/stats/by-location")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["Depot A"], 1);
        let (_, body) = call(&app, empty("GET", "/api/equipments/stats/by-status")).await;
        assert_eq!(body["data"]["OPERATIONAL"], 1);
        let (status, body) = call(&app, empty("GET", "/api/equipments/by-status/OPERATIONAL")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (status, _) = call(&app, empty("GET", "/api/equipments/by-status/LOST")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Serviced in March 2025: due once the threshold is shorter than that
        let (status, body) = call(&app, empty("GET", "/api/equipments/need-maintenance/30")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (status, _) = call(&app, empty("GET", "/api/equipments/need-maintenance/-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/tasks",
                json!({
                    "taskId": "EQ-1",
                    "description": "Inspect lift",
                    "priority": "LOW",
                    "estimatedDurationMinutes": 60,
                    "equipmentId": id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["equipmentId"], id);
        assert_eq!(body["data"]["equipment"], "Bus lift");
        let (_, body) = call(&app, empty("GET", &format!("/api/equipments/{}/tasks", id))).await;
        assert_eq!(body["data"][0]["taskId"], "EQ-1");

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                "/api/tasks",
                json!({
                    "taskId": "EQ-2",
                    "description": "Inspect ghost",
                    "priority": "LOW",
                    "estimatedDurationMinutes": 60,
                    "equipmentId": 4242
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn prediction_for_unregistered_equipment_is_404() {
        let (app, _) = app().await;
        let (status, _) = call(
            &app,
            json_request("POST", "/api/predictions/maintenance", json!({ "equipmentId": 4242 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            json_request("POST", "/api/predictions/maintenance", json!({ "equipmentId": "pump" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn vehicle_lifecycle_through_the_router() {
        let (app, _) = app().await;

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/vehicles",
                json!({ "vehicleNumber": "V-100", "licensePlate": "KN-0100", "capacity": 60 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/trip/start", id))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (status, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/service/start", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ACTIVE");
        let (_, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/trip/start", id))).await;
        assert_eq!(body["data"]["status"], "IN_TRANSIT");
        let (status, _) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/deactivate", id))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (_, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/trip/end", id))).await;
        assert_eq!(body["data"]["status"], "ACTIVE");
        let (_, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/service/end", id))).await;
        assert_eq!(body["data"]["status"], "INACTIVE");
        let (_, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/deactivate", id))).await;
        assert_eq!(body["data"]["isActive"], false);
        let (_, body) = call(&app, empty("PATCH", &format!("/api/vehicles/{}/activate", id))).await;
        assert_eq!(body["data"]["isActive"], true);

        let (status, body) = call(&app, empty("GET", "/api/vehicles/by-number/V-100")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id);
        let (status, _) = call(&app, empty("GET", "/api/vehicles/by-plate/XX-0000")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                &format!("/api/vehicles/{}/location", id),
                json!({ "latitude": -4.3217, "longitude": 15.3125 }),
            ),
        )
        .await;
        assert!(status.is_success());
        let (status, body) = call(
            &app,
            empty("GET", "/api/vehicles/in-radius?latitude=-4.32&longitude=15.31&radiusKm=2"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], id);
        let (status, _) = call(&app, empty("GET", "/api/vehicles/in-radius?longitude=15.31")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(
            &app,
            empty("GET", "/api/vehicles/in-radius?latitude=-4.32&longitude=15.31&minutesBack=0"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

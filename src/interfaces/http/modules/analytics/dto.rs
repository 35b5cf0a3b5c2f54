//! Analytics DTOs

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::analytics::{
    BusPerformance, CustomerStats, DriverRevenue, FinancialStatistics, PassengerStatistics,
    SystemOverview,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemOverviewDto {
    pub total_staff: usize,
    pub active_staff: usize,
    pub staff_by_role: BTreeMap<String, usize>,
    pub total_buses: u64,
    pub total_vehicles: u64,
    pub active_incidents: usize,
    pub open_tasks: usize,
    pub today_tickets: usize,
    pub today_revenue: f64,
}

impl From<SystemOverview> for SystemOverviewDto {
    fn from(o: SystemOverview) -> Self {
        Self {
            total_staff: o.total_staff,
            active_staff: o.active_staff,
            staff_by_role: o.staff_by_role,
            total_buses: o.total_buses,
            total_vehicles: o.total_vehicles,
            active_incidents: o.active_incidents,
            open_tasks: o.open_tasks,
            today_tickets: o.today_tickets,
            today_revenue: o.today_revenue,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStatsDto {
    pub passenger_id: i64,
    pub passenger_name: String,
    pub ticket_count: usize,
    pub total_spent: f64,
}

impl From<CustomerStats> for CustomerStatsDto {
    fn from(c: CustomerStats) -> Self {
        Self {
            passenger_id: c.passenger_id,
            passenger_name: c.passenger_name,
            ticket_count: c.ticket_count,
            total_spent: c.total_spent,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassengerStatisticsDto {
    pub total_passengers: usize,
    pub total_tickets: usize,
    pub top_customers: Vec<CustomerStatsDto>,
}

impl From<PassengerStatistics> for PassengerStatisticsDto {
    fn from(p: PassengerStatistics) -> Self {
        Self {
            total_passengers: p.total_passengers,
            total_tickets: p.total_tickets,
            top_customers: p.top_customers.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatisticsDto {
    pub period: String,
    pub total_revenue: f64,
    pub ticket_count: usize,
    pub average_ticket_price: f64,
    pub currency: String,
    /// Keyed by bus ID
    pub revenue_by_bus: BTreeMap<String, f64>,
    /// Keyed by `YYYY-MM-DD`
    pub daily_revenue: BTreeMap<String, f64>,
}

impl From<FinancialStatistics> for FinancialStatisticsDto {
    fn from(f: FinancialStatistics) -> Self {
        Self {
            period: f.period.as_str().to_string(),
            total_revenue: f.total_revenue,
            ticket_count: f.ticket_count,
            average_ticket_price: f.average_ticket_price,
            currency: f.currency.to_string(),
            revenue_by_bus: f
                .revenue_by_bus
                .into_iter()
                .map(|(bus, revenue)| (bus.to_string(), revenue))
                .collect(),
            daily_revenue: f.daily_revenue,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusPerformanceDto {
    pub bus_id: i64,
    pub bus_name: String,
    pub capacity: i32,
    pub ticket_count: usize,
    pub revenue: f64,
    pub occupancy_rate: f64,
}

impl From<BusPerformance> for BusPerformanceDto {
    fn from(b: BusPerformance) -> Self {
        Self {
            bus_id: b.bus_id,
            bus_name: b.bus_name,
            capacity: b.capacity,
            ticket_count: b.ticket_count,
            revenue: b.revenue,
            occupancy_rate: b.occupancy_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverRevenueDto {
    pub driver_id: i64,
    pub driver_name: String,
    pub ticket_count: usize,
    pub revenue: f64,
    pub average_ticket_price: f64,
    pub buses_used: Vec<i64>,
}

impl From<DriverRevenue> for DriverRevenueDto {
    fn from(d: DriverRevenue) -> Self {
        Self {
            driver_id: d.driver_id,
            driver_name: d.driver_name,
            ticket_count: d.ticket_count,
            revenue: d.revenue,
            average_ticket_price: d.average_ticket_price,
            buses_used: d.buses_used,
        }
    }
}

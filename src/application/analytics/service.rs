//! Read-only reporting over staff, fleet, incidents and ticket revenue

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, Months, Utc};

use crate::application::ticketing::pricing;
use crate::domain::maintenance::MaintenanceStatus;
use crate::domain::ticket::Ticket;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

const TOP_CUSTOMERS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            _ => Err(DomainError::Validation(format!(
                "Invalid period: {} (expected day, week, month or year)",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Start of the window ending at `now`
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Day => start_of_day(now),
            Self::Week => now - Duration::weeks(1),
            Self::Month => now.checked_sub_months(Months::new(1)).unwrap_or(now),
            Self::Year => now.checked_sub_months(Months::new(12)).unwrap_or(now),
        }
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

/// Fare of a sold ticket
pub fn ticket_price(ticket: &Ticket) -> f64 {
    pricing::quote(
        ticket.origin.as_deref(),
        ticket.destination.as_deref(),
        ticket.has_luggage,
    )
    .total_price
}

fn revenue_tickets(tickets: Vec<Ticket>) -> Vec<Ticket> {
    tickets.into_iter().filter(|t| t.status.holds_seat()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemOverview {
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

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerStats {
    pub passenger_id: i64,
    pub passenger_name: String,
    pub ticket_count: usize,
    pub total_spent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassengerStatistics {
    pub total_passengers: usize,
    pub total_tickets: usize,
    pub top_customers: Vec<CustomerStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatistics {
    pub period: Period,
    pub total_revenue: f64,
    pub ticket_count: usize,
    pub average_ticket_price: f64,
    pub currency: &'static str,
    pub revenue_by_bus: BTreeMap<i64, f64>,
    pub daily_revenue: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusPerformance {
    pub bus_id: i64,
    pub bus_name: String,
    pub capacity: i32,
    pub ticket_count: usize,
    pub revenue: f64,
    /// Percent of capacity
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverRevenue {
    pub driver_id: i64,
    pub driver_name: String,
    pub ticket_count: usize,
    pub revenue: f64,
    pub average_ticket_price: f64,
    pub buses_used: Vec<i64>,
}

pub fn passenger_statistics(tickets: &[Ticket]) -> PassengerStatistics {
    let mut by_passenger: HashMap<i64, CustomerStats> = HashMap::new();
    for t in tickets {
        let entry = by_passenger.entry(t.passenger_id).or_insert_with(|| CustomerStats {
            passenger_id: t.passenger_id,
            passenger_name: t.passenger_name(),
            ticket_count: 0,
            total_spent: 0.0,
        });
        entry.ticket_count += 1;
        entry.total_spent += ticket_price(t);
    }

    let total_passengers = by_passenger.len();
    let mut top: Vec<CustomerStats> = by_passenger.into_values().collect();
    top.sort_by(|a, b| {
        b.ticket_count
            .cmp(&a.ticket_count)
            .then(b.total_spent.total_cmp(&a.total_spent))
            .then(a.passenger_id.cmp(&b.passenger_id))
    });
    top.truncate(TOP_CUSTOMERS);

    PassengerStatistics {
        total_passengers,
        total_tickets: tickets.len(),
        top_customers: top,
    }
}

pub fn financial_statistics(period: Period, tickets: &[Ticket]) -> FinancialStatistics {
    let mut revenue_by_bus = BTreeMap::new();
    let mut daily_revenue = BTreeMap::new();
    let mut total = 0.0;
    for t in tickets {
        let price = ticket_price(t);
        total += price;
        *revenue_by_bus.entry(t.bus_id).or_insert(0.0) += price;
        *daily_revenue
            .entry(t.issued_at.format("%Y-%m-%d").to_string())
            .or_insert(0.0) += price;
    }

    FinancialStatistics {
        period,
        total_revenue: total,
        ticket_count: tickets.len(),
        average_ticket_price: if tickets.is_empty() {
            0.0
        } else {
            total / tickets.len() as f64
        },
        currency: pricing::CURRENCY,
        revenue_by_bus,
        daily_revenue,
    }
}

pub struct AnalyticsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AnalyticsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn sold_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<Ticket>> {
        Ok(revenue_tickets(
            self.repos.tickets().find_issued_between(start, end).await?,
        ))
    }

    pub async fn system_overview(&self) -> DomainResult<SystemOverview> {
        let staff = self.repos.staff().find_all().await?;
        let mut staff_by_role = BTreeMap::new();
        for s in &staff {
            *staff_by_role.entry(s.role.to_string()).or_insert(0) += 1;
        }

        let active_incidents = self
            .repos
            .incidents()
            .find_all()
            .await?
            .iter()
            .filter(|i| i.status.is_active())
            .count();
        let open_tasks = self
            .repos
            .maintenance_tasks()
            .find_all()
            .await?
            .iter()
            .filter(|t| {
                !matches!(t.status, MaintenanceStatus::Completed | MaintenanceStatus::Cancelled)
            })
            .count();

        let now = Utc::now();
        let today = self.sold_between(start_of_day(now), now).await?;

        Ok(SystemOverview {
            total_staff: staff.len(),
            active_staff: staff.iter().filter(|s| s.active).count(),
            staff_by_role,
            total_buses: self.repos.buses().count().await?,
            total_vehicles: self.repos.vehicles().count().await?,
            active_incidents,
            open_tasks,
            today_tickets: today.len(),
            today_revenue: today.iter().map(ticket_price).sum(),
        })
    }

    pub async fn passenger_statistics(&self) -> DomainResult<PassengerStatistics> {
        let tickets = revenue_tickets(self.repos.tickets().find_all().await?);
        Ok(passenger_statistics(&tickets))
    }

    pub async fn financial_statistics(&self, period: &str) -> DomainResult<FinancialStatistics> {
        let period = Period::parse(period)?;
        let now = Utc::now();
        let tickets = self.sold_between(period.start(now), now).await?;
        Ok(financial_statistics(period, &tickets))
    }

    /// Every bus, best revenue first
    pub async fn bus_performance(&self, period: &str) -> DomainResult<Vec<BusPerformance>> {
        let period = Period::parse(period)?;
        let now = Utc::now();
        let tickets = self.sold_between(period.start(now), now).await?;

        let mut rows: Vec<BusPerformance> = self
            .repos
            .buses()
            .find_all()
            .await?
            .into_iter()
            .map(|bus| {
                let sold: Vec<&Ticket> = tickets.iter().filter(|t| t.bus_id == bus.id).collect();
                let revenue = sold.iter().map(|t| ticket_price(t)).sum();
                let occupancy_rate = if bus.capacity > 0 {
                    sold.len() as f64 / f64::from(bus.capacity) * 100.0
                } else {
                    0.0
                };
                BusPerformance {
                    bus_id: bus.id,
                    bus_name: bus.name,
                    capacity: bus.capacity,
                    ticket_count: sold.len(),
                    revenue,
                    occupancy_rate,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        Ok(rows)
    }

    pub async fn driver_revenue(&self, period: &str) -> DomainResult<Vec<DriverRevenue>> {
        let period = Period::parse(period)?;
        let now = Utc::now();
        let tickets = self.sold_between(period.start(now), now).await?;

        let mut grouped: BTreeMap<i64, Vec<&Ticket>> = BTreeMap::new();
        for t in &tickets {
            if let Some(driver_id) = t.driver_id {
                grouped.entry(driver_id).or_default().push(t);
            }
        }

        let mut rows = Vec::with_capacity(grouped.len());
        for (driver_id, sold) in grouped {
            let driver_name = match self.repos.staff().find_by_id(driver_id).await? {
                Some(staff) => staff.full_name(),
                None => format!("#{}", driver_id),
            };
            let revenue: f64 = sold.iter().map(|t| ticket_price(t)).sum();
            let buses: BTreeSet<i64> = sold.iter().map(|t| t.bus_id).collect();
            rows.push(DriverRevenue {
                driver_id,
                driver_name,
                ticket_count: sold.len(),
                revenue,
                average_ticket_price: revenue / sold.len() as f64,
                buses_used: buses.into_iter().collect(),
            });
        }
        rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::TicketStatus;
    use chrono::TimeZone;

    fn ticket(passenger_id: i64, status: TicketStatus, destination: &str) -> Ticket {
        let now = Utc.with_ymd_and_hms(2025, 5, 2, 9, 0, 0).unwrap();
        Ticket {
            id: 0,
            passenger_id,
            first_name: "Grace".into(),
            last_name: format!("P{}", passenger_id),
            ticket_number: format!("TKT{}", passenger_id),
            reservation_code: "RES".into(),
            seat_number: "1".into(),
            departure_time: now,
            boarding_time: None,
            origin: Some("Gare Centrale".into()),
            destination: Some(destination.into()),
            status,
            qr_code: None,
            luggage_weight: None,
            has_luggage: false,
            bus_id: 1,
            driver_id: None,
            trip_id: None,
            issued_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn periods() {
        assert_eq!(Period::parse("Week").unwrap(), Period::Week);
        assert_eq!(Period::parse("monthly").unwrap(), Period::Month);
        assert!(matches!(Period::parse("decade"), Err(DomainError::Validation(_))));

        let now = Utc.with_ymd_and_hms(2025, 3, 31, 15, 30, 0).unwrap();
        assert_eq!(Period::Day.start(now), Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap());
        assert_eq!(Period::Month.start(now), Utc.with_ymd_and_hms(2025, 2, 28, 15, 30, 0).unwrap());
    }

    #[test]
    fn revenue_uses_the_fare_table() {
        let tickets = vec![
            ticket(1, TicketStatus::Paid, "Kimbanseke"),
            ticket(1, TicketStatus::Boarded, "Limete"),
            ticket(2, TicketStatus::Paid, "Ndjili"),
        ];
        let stats = financial_statistics(Period::Day, &tickets);
        assert_eq!(stats.total_revenue, 4000.0 + 2000.0 + 3000.0);
        assert_eq!(stats.ticket_count, 3);
        assert_eq!(stats.average_ticket_price, 3000.0);
        assert_eq!(stats.currency, "FC");
        assert_eq!(stats.daily_revenue["2025-05-02"], 9000.0);
    }

    #[test]
    fn top_customers_rank_by_ticket_count() {
        let tickets = revenue_tickets(vec![
            ticket(1, TicketStatus::Paid, "Limete"),
            ticket(2, TicketStatus::Paid, "Limete"),
            ticket(2, TicketStatus::Boarded, "Limete"),
            ticket(3, TicketStatus::Issued, "Limete"),
        ]);
        let stats = passenger_statistics(&tickets);
        assert_eq!(stats.total_passengers, 2);
        assert_eq!(stats.total_tickets, 3);
        assert_eq!(stats.top_customers[0].passenger_id, 2);
        assert_eq!(stats.top_customers[0].ticket_count, 2);
        assert_eq!(stats.top_customers[0].total_spent, 4000.0);
    }

    #[tokio::test]
    async fn overview_counts_the_system() {
        use crate::domain::staff::StaffRole;
        use crate::test_support::{repositories, seed_staff};

        let repos = repositories().await;
        seed_staff(repos.as_ref(), "admin@imas.cd", StaffRole::Admin).await;
        seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let svc = AnalyticsService::new(repos);

        let overview = svc.system_overview().await.unwrap();
        assert_eq!(overview.total_staff, 2);
        assert_eq!(overview.staff_by_role["DRIVER"], 1);
        assert_eq!(overview.today_tickets, 0);
        assert_eq!(overview.today_revenue, 0.0);

        assert!(svc.financial_statistics("fortnight").await.is_err());
        assert!(svc.bus_performance("week").await.unwrap().is_empty());
    }
}

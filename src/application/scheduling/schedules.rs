//! Weekly bus schedules with driver notification

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::schedule::{default_arrival, DayOfWeek, Schedule};
use crate::domain::staff::Staff;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::mail::{MailMessage, Mailer};
use crate::shared::{format_short, non_blank, parse_datetime};

#[derive(Debug, Clone, Default)]
pub struct ScheduleInput {
    pub bus_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub route_id: Option<i64>,
    pub day_of_week: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

fn schedule_email(driver: &Staff, schedule: &Schedule, subject: &str) -> MailMessage {
    let body = format!(
        "Dear {},\n\nYou have been scheduled to drive bus #{} on route #{}.\n\n\
         Day: {}\nDeparture: {}\nArrival: {}\nEstimated duration: {} minutes\n\n\
         Best regards,\nImasProject Team",
        driver.full_name(),
        schedule.bus_id,
        schedule.route_id,
        schedule.day_of_week,
        format_short(schedule.departure_time),
        format_short(schedule.arrival_time),
        schedule.estimated_duration_minutes,
    );
    MailMessage::new(&driver.email, subject, body)
}

pub struct ScheduleService {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn Mailer>,
}

impl ScheduleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, mailer: Arc<dyn Mailer>) -> Self {
        Self { repos, mailer }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Schedule> {
        self.repos
            .schedules()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Schedule", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Schedule>> {
        self.repos.schedules().find_all().await
    }

    pub async fn by_bus(&self, bus_id: i64) -> DomainResult<Vec<Schedule>> {
        self.repos.schedules().find_by_bus(bus_id).await
    }

    pub async fn by_day(&self, day: &str) -> DomainResult<Vec<Schedule>> {
        let day = DayOfWeek::parse(day)?;
        self.repos.schedules().find_by_day(day).await
    }

    /// Bus, driver and route must exist; the driver may not drive another bus
    async fn driver_for(&self, schedule: &Schedule) -> DomainResult<Staff> {
        if self.repos.buses().find_by_id(schedule.bus_id).await?.is_none() {
            return Err(DomainError::Validation("Bus not found".into()));
        }
        if self.repos.routes().find_by_id(schedule.route_id).await?.is_none() {
            return Err(DomainError::Validation("Route not found".into()));
        }
        let driver = self
            .repos
            .staff()
            .find_by_id(schedule.driver_id)
            .await?
            .ok_or_else(|| DomainError::Validation("Driver not found".into()))?;

        let driven = self.repos.buses().find_by_driver(driver.id).await?;
        if driven.iter().any(|b| b.id != schedule.bus_id) {
            return Err(DomainError::Validation(
                "Driver is already assigned to another bus".into(),
            ));
        }
        Ok(driver)
    }

    fn apply(schedule: &mut Schedule, input: &ScheduleInput) -> DomainResult<()> {
        if let Some(v) = input.bus_id {
            schedule.bus_id = v;
        }
        if let Some(v) = input.driver_id {
            schedule.driver_id = v;
        }
        if let Some(v) = input.route_id {
            schedule.route_id = v;
        }
        if let Some(d) = input.estimated_duration_minutes {
            if d <= 0 {
                return Err(DomainError::Validation(
                    "Estimated duration must be greater than zero".into(),
                ));
            }
            schedule.estimated_duration_minutes = d;
        }
        if let Some(raw) = non_blank(input.departure_time.as_deref()) {
            schedule.departure_time = parse_datetime(raw).ok_or_else(|| {
                DomainError::Validation(format!("Invalid departure time: {}", raw))
            })?;
        }
        schedule.arrival_time = match non_blank(input.arrival_time.as_deref()) {
            Some(raw) => parse_datetime(raw).ok_or_else(|| {
                DomainError::Validation(format!("Invalid arrival time: {}", raw))
            })?,
            None => default_arrival(schedule.departure_time, schedule.estimated_duration_minutes),
        };
        if schedule.arrival_time <= schedule.departure_time {
            return Err(DomainError::Validation(
                "Arrival time must be after departure time".into(),
            ));
        }
        schedule.day_of_week = match non_blank(input.day_of_week.as_deref()) {
            Some(day) => DayOfWeek::parse(day)?,
            None => DayOfWeek::of(schedule.departure_time),
        };
        if let Some(v) = input.is_active {
            schedule.is_active = v;
        }
        Ok(())
    }

    async fn notify_driver(&self, driver: &Staff, schedule: &Schedule, subject: &str) {
        if let Err(e) = self.mailer.send(schedule_email(driver, schedule, subject)).await {
            warn!(driver_id = driver.id, schedule_id = schedule.id, error = %e, "Failed to send schedule email");
        }
    }

    pub async fn create(&self, input: ScheduleInput) -> DomainResult<Schedule> {
        let (Some(bus_id), Some(driver_id), Some(route_id)) =
            (input.bus_id, input.driver_id, input.route_id)
        else {
            return Err(DomainError::Validation(
                "busId, driverId and routeId are required".into(),
            ));
        };
        let departure = non_blank(input.departure_time.as_deref())
            .ok_or_else(|| DomainError::Validation("Departure time is required".into()))?;
        let departure_time = parse_datetime(departure).ok_or_else(|| {
            DomainError::Validation(format!("Invalid departure time: {}", departure))
        })?;
        let duration = input
            .estimated_duration_minutes
            .ok_or_else(|| DomainError::Validation("Estimated duration is required".into()))?;

        let now = Utc::now();
        let mut schedule = Schedule {
            id: 0,
            bus_id,
            driver_id,
            route_id,
            day_of_week: DayOfWeek::of(departure_time),
            departure_time,
            arrival_time: departure_time,
            estimated_duration_minutes: duration,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        Self::apply(&mut schedule, &input)?;
        let driver = self.driver_for(&schedule).await?;

        let schedule = self.repos.schedules().create(schedule).await?;
        info!(schedule_id = schedule.id, bus_id, driver_id, day = %schedule.day_of_week, "Schedule created");
        self.notify_driver(&driver, &schedule, "New Bus Schedule Assignment").await;
        Ok(schedule)
    }

    pub async fn update(&self, id: i64, input: ScheduleInput) -> DomainResult<Schedule> {
        let mut schedule = self.get(id).await?;
        Self::apply(&mut schedule, &input)?;
        let driver = self.driver_for(&schedule).await?;
        schedule.updated_at = Utc::now();

        let schedule = self.repos.schedules().update(schedule).await?;
        self.notify_driver(&driver, &schedule, "Bus Schedule Updated").await;
        Ok(schedule)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.schedules().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use crate::domain::bus::Bus;
    use crate::domain::route::{Route, RouteType};
    use crate::domain::staff::StaffRole;
    use crate::infrastructure::mail::LogMailer;
    use crate::test_support::{repositories, seed_staff};

    struct Fixture {
        svc: ScheduleService,
        repos: Arc<dyn RepositoryProvider>,
        bus_id: i64,
        route_id: i64,
        driver_id: i64,
    }

    async fn fixture() -> Fixture {
        let repos = repositories().await;
        let bus = repos.buses().create(Bus::new("B-7", 40)).await.unwrap();
        let route = repos
            .routes()
            .create(Route::new("Ligne 7", "L7", RouteType::Urban))
            .await
            .unwrap();
        let driver = seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let mailer = Arc::new(LogMailer::new(&MailConfig::default()));
        Fixture {
            svc: ScheduleService::new(repos.clone(), mailer),
            repos,
            bus_id: bus.id,
            route_id: route.id,
            driver_id: driver.id,
        }
    }

    fn input(f: &Fixture) -> ScheduleInput {
        ScheduleInput {
            bus_id: Some(f.bus_id),
            driver_id: Some(f.driver_id),
            route_id: Some(f.route_id),
            // A Wednesday
            departure_time: Some("2025-03-05T07:30:00".into()),
            estimated_duration_minutes: Some(45),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn defaults_arrival_and_weekday() {
        let f = fixture().await;
        let s = f.svc.create(input(&f)).await.unwrap();
        assert_eq!(s.day_of_week, DayOfWeek::Wednesday);
        assert_eq!(format_short(s.arrival_time), "2025-03-05 08:15");

        assert_eq!(f.svc.by_day("wednesday").await.unwrap().len(), 1);
        assert!(matches!(f.svc.by_day("FUNDAY").await, Err(DomainError::Validation(_))));
        assert_eq!(f.svc.by_bus(f.bus_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_bad_input() {
        let f = fixture().await;

        let zero = ScheduleInput { estimated_duration_minutes: Some(0), ..input(&f) };
        assert!(matches!(f.svc.create(zero).await, Err(DomainError::Validation(_))));

        let no_bus = ScheduleInput { bus_id: Some(999), ..input(&f) };
        assert!(matches!(f.svc.create(no_bus).await, Err(DomainError::Validation(_))));

        let missing = ScheduleInput { route_id: None, ..input(&f) };
        assert!(matches!(f.svc.create(missing).await, Err(DomainError::Validation(_))));

        let mut other = Bus::new("B-8", 30);
        other.driver_id = Some(f.driver_id);
        f.repos.buses().create(other).await.unwrap();
        assert!(matches!(f.svc.create(input(&f)).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn update_recomputes_arrival() {
        let f = fixture().await;
        let s = f.svc.create(input(&f)).await.unwrap();
        let updated = f
            .svc
            .update(s.id, ScheduleInput { estimated_duration_minutes: Some(60), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(format_short(updated.arrival_time), "2025-03-05 08:30");

        f.svc.delete(s.id).await.unwrap();
        assert!(matches!(f.svc.get(s.id).await, Err(DomainError::NotFound { .. })));
    }
}

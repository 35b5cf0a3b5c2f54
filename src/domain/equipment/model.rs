//! Equipment domain entities

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::incident::TaskPriority;

crate::wire_enum! {
    pub enum EquipmentStatus("equipment status") {
        Operational => "OPERATIONAL",
        UnderMaintenance => "UNDER_MAINTENANCE",
        Defective => "DEFECTIVE",
        Retired => "RETIRED",
    }
}

/// A piece of depot or on-board equipment that maintenance work targets
#[derive(Debug, Clone)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub model: Option<String>,
    /// Unique when present
    pub serial_number: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: EquipmentStatus,
    pub last_maintenance_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            model: None,
            serial_number: None,
            installation_date: None,
            location: None,
            status: EquipmentStatus::Operational,
            last_maintenance_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Never serviced, or last serviced before `threshold`
    pub fn needs_maintenance(&self, threshold: NaiveDate) -> bool {
        self.last_maintenance_date.map_or(true, |last| last < threshold)
    }

    /// Share of days without a HIGH-priority repair, clamped to `0.0..=1.0`.
    ///
    /// Each HIGH record since installation costs 100 "issue days"; an
    /// item with no history scores 1.0.
    pub fn reliability(&self, history: &[MaintenanceRecord], today: NaiveDate) -> f64 {
        if history.is_empty() {
            return 1.0;
        }
        let high = history
            .iter()
            .filter(|r| r.priority == TaskPriority::High)
            .count() as f64;
        let since = self
            .installation_date
            .unwrap_or_else(|| self.created_at.date_naive());
        let days = (today - since).num_days().max(1) as f64;
        (1.0 - (high / days) * 100.0).clamp(0.0, 1.0)
    }

    /// Book a finished or ongoing service: the item is back in operation and
    /// a closed record moves the last-maintenance date.
    pub fn record_service(&mut self, record: &MaintenanceRecord, now: DateTime<Utc>) {
        if let Some(end) = record.end_date {
            self.last_maintenance_date = Some(end);
        }
        self.status = EquipmentStatus::Operational;
        self.updated_at = now;
    }
}

/// One service performed on an equipment item
#[derive(Debug, Clone)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub equipment_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_hours: i32,
    pub priority: TaskPriority,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Started within `from..=to`
    pub fn started_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date >= from && self.start_date <= to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(priority: TaskPriority, start: NaiveDate, end: Option<NaiveDate>) -> MaintenanceRecord {
        MaintenanceRecord {
            id: 0,
            equipment_id: 1,
            start_date: start,
            end_date: end,
            estimated_hours: 4,
            priority,
            description: "Hydraulic check".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reliability_drops_with_urgent_repairs() {
        let mut lift = Equipment::new("Bus lift");
        lift.installation_date = Some(date(2024, 1, 1));
        let today = date(2024, 12, 31);

        assert_eq!(lift.reliability(&[], today), 1.0);
        let routine = [record(TaskPriority::Low, date(2024, 3, 1), None)];
        assert_eq!(lift.reliability(&routine, today), 1.0);

        // 365 days, one urgent repair: 1 - 100/365
        let urgent = [record(TaskPriority::High, date(2024, 3, 1), None)];
        let score = lift.reliability(&urgent, today);
        assert!((score - (1.0 - 100.0 / 365.0)).abs() < 1e-9);

        // Installed today: the score bottoms out at zero
        lift.installation_date = Some(today);
        assert_eq!(lift.reliability(&urgent, today), 0.0);
    }

    #[test]
    fn service_reopens_and_moves_last_maintenance() {
        let mut pump = Equipment::new("Fuel pump");
        pump.status = EquipmentStatus::Defective;
        assert!(pump.needs_maintenance(date(2025, 1, 1)));

        pump.record_service(&record(TaskPriority::Medium, date(2025, 2, 1), None), Utc::now());
        assert_eq!(pump.status, EquipmentStatus::Operational);
        assert_eq!(pump.last_maintenance_date, None);

        pump.record_service(
            &record(TaskPriority::Medium, date(2025, 2, 1), Some(date(2025, 2, 3))),
            Utc::now(),
        );
        assert_eq!(pump.last_maintenance_date, Some(date(2025, 2, 3)));
        assert!(!pump.needs_maintenance(date(2025, 2, 3)));
        assert!(pump.needs_maintenance(date(2025, 2, 4)));
    }

    #[test]
    fn history_window_is_inclusive() {
        let r = record(TaskPriority::Low, date(2025, 5, 10), None);
        assert!(r.started_between(date(2025, 5, 10), date(2025, 5, 10)));
        assert!(!r.started_between(date(2025, 5, 11), date(2025, 6, 1)));
    }
}

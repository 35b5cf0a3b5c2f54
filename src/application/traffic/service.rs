//! Traffic observations: ingestion, geographic queries and aggregates

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::application::events::{Event, SharedEventBus, TrafficDataRecordedEvent};
use crate::domain::traffic::{level_description, TrafficData, TrafficQuery};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{days_before, hours_before, non_blank, validate_pagination, PaginatedResult};

pub const DEFAULT_RADIUS: f64 = 0.01;
pub const NEARBY_LIMIT: u64 = 50;
const CURRENT_LEVEL_SAMPLE: u64 = 10;
const DEFAULT_SEARCH_HOURS: i64 = 24;
const SUMMARY_SAMPLE: u64 = 1000;
/// Decimal places kept when grouping hotspots
const HOTSPOT_PRECISION: f64 = 1000.0;

#[derive(Debug, Clone, Default)]
pub struct TrafficInput {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub traffic_level: Option<i32>,
    pub average_speed: Option<f64>,
    pub weather_condition: Option<String>,
    pub is_holiday: Option<bool>,
    pub vehicle_count: Option<i32>,
    pub visibility: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub road_type: Option<String>,
    pub event_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentLevel {
    pub level: i32,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub latitude: f64,
    pub longitude: f64,
    pub average_level: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyStat {
    pub hour: i32,
    pub average_traffic_level: f64,
    pub average_speed: Option<f64>,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSummary {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub total_records: usize,
    pub average_traffic_level: f64,
    pub average_speed: f64,
    pub level_distribution: BTreeMap<String, usize>,
}

/// Latitude/longitude bounds for hourly statistics
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    fn contains(&self, d: &TrafficData) -> bool {
        (self.lat_min..=self.lat_max).contains(&d.latitude)
            && (self.lon_min..=self.lon_max).contains(&d.longitude)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Truncated mean of the newest samples, 1 when there are none
pub fn current_level(newest_first: &[TrafficData]) -> i32 {
    let sample: Vec<i32> = newest_first
        .iter()
        .take(CURRENT_LEVEL_SAMPLE as usize)
        .map(|d| d.traffic_level)
        .collect();
    if sample.is_empty() {
        return 1;
    }
    sample.iter().sum::<i32>() / sample.len() as i32
}

pub fn hotspots(data: &[TrafficData], min_level: f64) -> Vec<Hotspot> {
    let key = |v: f64| (v * HOTSPOT_PRECISION).round() as i64;
    let mut groups: BTreeMap<(i64, i64), (i64, usize)> = BTreeMap::new();
    for d in data {
        let entry = groups.entry((key(d.latitude), key(d.longitude))).or_insert((0, 0));
        entry.0 += i64::from(d.traffic_level);
        entry.1 += 1;
    }

    let mut spots: Vec<Hotspot> = groups
        .into_iter()
        .map(|((lat, lng), (sum, n))| Hotspot {
            latitude: lat as f64 / HOTSPOT_PRECISION,
            longitude: lng as f64 / HOTSPOT_PRECISION,
            average_level: sum as f64 / n as f64,
            samples: n,
        })
        .filter(|h| h.average_level >= min_level)
        .collect();
    spots.sort_by(|a, b| b.average_level.total_cmp(&a.average_level));
    spots
}

pub fn hourly_stats(data: &[TrafficData]) -> Vec<HourlyStat> {
    let mut by_hour: BTreeMap<i32, Vec<&TrafficData>> = BTreeMap::new();
    for d in data {
        by_hour.entry(d.hour_of_day).or_default().push(d);
    }
    by_hour
        .into_iter()
        .map(|(hour, rows)| HourlyStat {
            hour,
            average_traffic_level: round2(
                mean(rows.iter().map(|d| f64::from(d.traffic_level))).unwrap_or(0.0),
            ),
            average_speed: mean(rows.iter().filter_map(|d| d.average_speed)).map(round2),
            samples: rows.len(),
        })
        .collect()
}

/// Weekday mornings 7–9 and evenings 17–19
pub fn is_rush_hour(d: &TrafficData) -> bool {
    (1..=5).contains(&d.day_of_week)
        && ((7..=9).contains(&d.hour_of_day) || (17..=19).contains(&d.hour_of_day))
}

pub fn summarize(data: &[TrafficData], since: DateTime<Utc>, until: DateTime<Utc>) -> TrafficSummary {
    let mut level_distribution = BTreeMap::new();
    for d in data {
        *level_distribution.entry(d.traffic_level.to_string()).or_insert(0) += 1;
    }
    TrafficSummary {
        since,
        until,
        total_records: data.len(),
        average_traffic_level: round2(
            mean(data.iter().map(|d| f64::from(d.traffic_level))).unwrap_or(0.0),
        ),
        average_speed: round2(mean(data.iter().filter_map(|d| d.average_speed)).unwrap_or(0.0)),
        level_distribution,
    }
}

fn validate_point(lat: f64, lng: f64) -> DomainResult<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(DomainError::Validation(format!(
            "Invalid coordinates: {}, {}",
            lat, lng
        )));
    }
    Ok(())
}

fn validate_radius(radius: f64) -> DomainResult<f64> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(DomainError::Validation("Radius must be positive".into()));
    }
    Ok(radius)
}

pub struct TrafficService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl TrafficService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    fn apply(data: &mut TrafficData, input: TrafficInput) -> DomainResult<()> {
        if let Some(lat) = input.latitude {
            data.latitude = lat;
        }
        if let Some(lng) = input.longitude {
            data.longitude = lng;
        }
        validate_point(data.latitude, data.longitude)?;
        if let Some(level) = input.traffic_level {
            data.traffic_level = TrafficData::validate_level(level)?;
        }
        if let Some(speed) = input.average_speed {
            if speed < 0.0 {
                return Err(DomainError::Validation("Average speed cannot be negative".into()));
            }
            data.average_speed = Some(speed);
        }
        if let Some(v) = input.weather_condition {
            data.weather_condition = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = input.is_holiday {
            data.is_holiday = v;
        }
        if input.vehicle_count.is_some() {
            data.vehicle_count = input.vehicle_count;
        }
        if input.visibility.is_some() {
            data.visibility = input.visibility;
        }
        if input.temperature.is_some() {
            data.temperature = input.temperature;
        }
        if let Some(h) = input.humidity {
            if !(0.0..=100.0).contains(&h) {
                return Err(DomainError::Validation("Humidity must be between 0 and 100".into()));
            }
            data.humidity = Some(h);
        }
        if let Some(v) = input.road_type {
            data.road_type = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = input.event_type {
            data.event_type = non_blank(Some(&v)).map(str::to_string);
        }
        Ok(())
    }

    fn build(input: TrafficInput, now: DateTime<Utc>) -> DomainResult<TrafficData> {
        let (Some(latitude), Some(longitude)) = (input.latitude, input.longitude) else {
            return Err(DomainError::Validation("Latitude and longitude are required".into()));
        };
        let traffic_level = input
            .traffic_level
            .ok_or_else(|| DomainError::Validation("Traffic level is required".into()))?;

        let mut data = TrafficData {
            id: 0,
            latitude,
            longitude,
            timestamp: now,
            traffic_level: TrafficData::validate_level(traffic_level)?,
            average_speed: None,
            weather_condition: None,
            is_holiday: false,
            day_of_week: 1,
            hour_of_day: 0,
            vehicle_count: None,
            visibility: None,
            temperature: None,
            humidity: None,
            road_type: None,
            event_type: None,
            created_at: now,
            updated_at: now,
        };
        Self::apply(&mut data, input)?;
        data.stamp(now);
        Ok(data)
    }

    fn announce(&self, data: &TrafficData) {
        self.event_bus
            .publish(Event::TrafficDataRecorded(TrafficDataRecordedEvent {
                id: data.id,
                latitude: data.latitude,
                longitude: data.longitude,
                traffic_level: data.traffic_level,
                average_speed: data.average_speed,
                timestamp: data.timestamp,
            }));
    }

    pub async fn record(&self, input: TrafficInput) -> DomainResult<TrafficData> {
        let data = Self::build(input, Utc::now())?;
        let data = self.repos.traffic_data().create(data).await?;
        debug!(id = data.id, level = data.traffic_level, "Traffic observation recorded");
        self.announce(&data);
        Ok(data)
    }

    /// All entries are validated before any is stored
    pub async fn record_batch(&self, inputs: Vec<TrafficInput>) -> DomainResult<Vec<TrafficData>> {
        let now = Utc::now();
        let rows = inputs
            .into_iter()
            .map(|input| Self::build(input, now))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut saved = Vec::with_capacity(rows.len());
        for row in rows {
            let data = self.repos.traffic_data().create(row).await?;
            self.announce(&data);
            saved.push(data);
        }
        info!(count = saved.len(), "Traffic batch recorded");
        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> DomainResult<TrafficData> {
        self.repos
            .traffic_data()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("TrafficData", "id", id))
    }

    pub async fn update(&self, id: i64, input: TrafficInput) -> DomainResult<TrafficData> {
        let mut data = self.get(id).await?;
        Self::apply(&mut data, input)?;
        data.updated_at = Utc::now();
        self.repos.traffic_data().update(data).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.traffic_data().delete(id).await
    }

    /// 1-based page; size is clamped to 1..=100
    pub async fn page(&self, page: u64, size: u64) -> DomainResult<PaginatedResult<TrafficData>> {
        let (page, size) = validate_pagination(Some(page), Some(size));
        self.repos.traffic_data().find_page(page, size).await
    }

    pub async fn nearby(&self, lat: f64, lng: f64, radius: f64) -> DomainResult<Vec<TrafficData>> {
        validate_point(lat, lng)?;
        let radius = validate_radius(radius)?;
        self.repos
            .traffic_data()
            .find_nearby(lat, lng, radius, NEARBY_LIMIT)
            .await
    }

    pub async fn current_level(&self, lat: f64, lng: f64, radius: f64) -> DomainResult<CurrentLevel> {
        validate_point(lat, lng)?;
        let radius = validate_radius(radius)?;
        let newest = self
            .repos
            .traffic_data()
            .find_nearby(lat, lng, radius, CURRENT_LEVEL_SAMPLE)
            .await?;
        let level = current_level(&newest);
        Ok(CurrentLevel {
            level,
            description: level_description(level),
        })
    }

    /// Criteria search; the window defaults to the last 24 hours
    pub async fn search(&self, mut query: TrafficQuery) -> DomainResult<Vec<TrafficData>> {
        if let (Some(min), Some(max)) = (query.min_traffic_level, query.max_traffic_level) {
            if min > max {
                return Err(DomainError::Validation(
                    "minTrafficLevel must not exceed maxTrafficLevel".into(),
                ));
            }
        }
        if query.start_time.is_none() && query.end_time.is_none() {
            query.start_time = Some(Utc::now() - Duration::hours(DEFAULT_SEARCH_HOURS));
        }
        if query.latitude.is_some() && query.longitude.is_some() && query.radius.is_none() {
            query.radius = Some(DEFAULT_RADIUS);
        }
        self.repos.traffic_data().search(&query).await
    }

    async fn since_hours(&self, hours: i64) -> DomainResult<Vec<TrafficData>> {
        if hours <= 0 {
            return Err(DomainError::Validation("hours must be positive".into()));
        }
        let since = hours_before(Utc::now(), hours)
            .ok_or_else(|| DomainError::Validation(format!("hours out of range: {}", hours)))?;
        self.repos.traffic_data().find_since(since).await
    }

    pub async fn hotspots(&self, hours: i64, min_level: f64) -> DomainResult<Vec<Hotspot>> {
        Ok(hotspots(&self.since_hours(hours).await?, min_level))
    }

    pub async fn hourly(&self, hours: i64, area: Option<BoundingBox>) -> DomainResult<Vec<HourlyStat>> {
        let mut rows = self.since_hours(hours).await?;
        if let Some(area) = area {
            rows.retain(|d| area.contains(d));
        }
        Ok(hourly_stats(&rows))
    }

    pub async fn rush_hour(&self, hours: i64) -> DomainResult<Vec<TrafficData>> {
        let mut rows = self.since_hours(hours).await?;
        rows.retain(is_rush_hour);
        Ok(rows)
    }

    pub async fn summary(&self, since: Option<DateTime<Utc>>) -> DomainResult<TrafficSummary> {
        let until = Utc::now();
        let since = since.unwrap_or(until - Duration::hours(DEFAULT_SEARCH_HOURS));
        let rows = self
            .repos
            .traffic_data()
            .search(&TrafficQuery {
                start_time: Some(since),
                limit: Some(SUMMARY_SAMPLE),
                ..Default::default()
            })
            .await?;
        Ok(summarize(&rows, since, until))
    }

    /// Delete observations older than `retention_days`
    pub async fn purge_older_than(&self, retention_days: i64) -> DomainResult<u64> {
        let cutoff = days_before(Utc::now(), retention_days).ok_or_else(|| {
            DomainError::Validation(format!("retention out of range: {} days", retention_days))
        })?;
        self.repos.traffic_data().delete_older_than(cutoff).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::test_support::repositories;
    use chrono::TimeZone;

    fn obs(lat: f64, lng: f64, level: i32) -> TrafficInput {
        TrafficInput {
            latitude: Some(lat),
            longitude: Some(lng),
            traffic_level: Some(level),
            average_speed: Some(20.0),
            ..Default::default()
        }
    }

    fn row(level: i32, day: i32, hour: i32) -> TrafficData {
        let now = Utc::now();
        TrafficData {
            id: 0,
            latitude: -4.3251,
            longitude: 15.3222,
            timestamp: now,
            traffic_level: level,
            average_speed: None,
            weather_condition: None,
            is_holiday: false,
            day_of_week: day,
            hour_of_day: hour,
            vehicle_count: None,
            visibility: None,
            temperature: None,
            humidity: None,
            road_type: None,
            event_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn current_level_truncates_the_mean() {
        assert_eq!(current_level(&[]), 1);
        let rows = vec![row(3, 1, 8), row(4, 1, 8)];
        assert_eq!(current_level(&rows), 3);
        let many: Vec<_> = (0..12).map(|i| row(if i < 10 { 5 } else { 1 }, 1, 8)).collect();
        assert_eq!(current_level(&many), 5);
    }

    #[test]
    fn rush_hours_are_weekday_peaks() {
        assert!(is_rush_hour(&row(3, 1, 7)));
        assert!(is_rush_hour(&row(3, 5, 19)));
        assert!(!is_rush_hour(&row(3, 6, 8)));
        assert!(!is_rush_hour(&row(3, 3, 12)));
    }

    #[test]
    fn hotspots_group_nearby_points() {
        let mut a = row(5, 1, 8);
        let mut b = row(3, 1, 8);
        b.latitude += 0.0001;
        let mut c = row(1, 1, 8);
        c.latitude = 0.5;
        a.longitude = 15.3222;

        let spots = hotspots(&[a, b, c], 3.0);
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].average_level, 4.0);
        assert_eq!(spots[0].samples, 2);
    }

    #[test]
    fn summary_rounds_averages() {
        let mut a = row(2, 1, 8);
        a.average_speed = Some(10.0);
        let b = row(3, 1, 9);
        let c = row(3, 1, 9);
        let since = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let s = summarize(&[a, b, c], since, Utc::now());
        assert_eq!(s.total_records, 3);
        assert_eq!(s.average_traffic_level, 2.67);
        assert_eq!(s.average_speed, 10.0);
        assert_eq!(s.level_distribution["3"], 2);

        let hourly = hourly_stats(&[row(2, 1, 8), row(4, 1, 8), row(1, 1, 9)]);
        assert_eq!(hourly.len(), 2);
        assert_eq!(hourly[0].average_traffic_level, 3.0);
        assert_eq!(hourly[0].average_speed, None);
    }

    #[tokio::test]
    async fn record_validates_and_publishes() {
        let bus = Arc::new(EventBus::new());
        let svc = TrafficService::new(repositories().await, bus.clone());
        let mut sub = bus.subscribe();

        assert!(matches!(svc.record(obs(-4.3, 15.3, 6)).await, Err(DomainError::Validation(_))));
        assert!(matches!(
            svc.record(TrafficInput { latitude: None, ..obs(0.0, 0.0, 2) }).await,
            Err(DomainError::Validation(_))
        ));

        let saved = svc.record(obs(-4.3, 15.3, 4)).await.unwrap();
        assert!((1..=7).contains(&saved.day_of_week));
        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.event.event_type(), "traffic_data_recorded");

        let level = svc.current_level(-4.3, 15.3, DEFAULT_RADIUS).await.unwrap();
        assert_eq!(level.level, 4);
        assert_eq!(level.description, "Embouteillé");
        let empty = svc.current_level(10.0, 10.0, DEFAULT_RADIUS).await.unwrap();
        assert_eq!(empty.level, 1);
    }

    #[tokio::test]
    async fn batch_is_all_or_nothing() {
        let svc = TrafficService::new(repositories().await, Arc::new(EventBus::new()));
        assert!(svc
            .record_batch(vec![obs(-4.3, 15.3, 2), obs(-4.3, 15.3, 9)])
            .await
            .is_err());
        assert_eq!(svc.page(1, 10).await.unwrap().total, 0);

        let saved = svc
            .record_batch(vec![obs(-4.3, 15.3, 2), obs(-4.31, 15.31, 3)])
            .await
            .unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(svc.nearby(-4.3, 15.3, 0.02).await.unwrap().len(), 2);
        assert_eq!(svc.nearby(-4.3, 15.3, 0.001).await.unwrap().len(), 1);
        assert!(svc.nearby(-4.3, 15.3, 0.0).await.is_err());

        let found = svc
            .search(TrafficQuery { min_traffic_level: Some(3), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let updated = svc
            .update(saved[0].id, TrafficInput { traffic_level: Some(5), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.traffic_level, 5);
        assert_eq!(svc.summary(None).await.unwrap().total_records, 2);

        svc.delete(saved[0].id).await.unwrap();
        assert!(matches!(svc.get(saved[0].id).await, Err(DomainError::NotFound { .. })));
        assert_eq!(svc.purge_older_than(30).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn windows_outside_the_calendar_are_rejected() {
        let svc = TrafficService::new(repositories().await, Arc::new(EventBus::new()));
        svc.record(obs(-4.3, 15.3, 4)).await.unwrap();

        assert!(matches!(svc.hotspots(i64::MAX, 1.0).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.hourly(i64::MAX, None).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.rush_hour(i64::MAX).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.rush_hour(0).await, Err(DomainError::Validation(_))));
        assert!(matches!(svc.purge_older_than(i64::MAX).await, Err(DomainError::Validation(_))));
        assert_eq!(svc.hotspots(24, 1.0).await.unwrap().len(), 1);
    }
}

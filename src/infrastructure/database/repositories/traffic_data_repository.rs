//! SeaORM implementation of TrafficDataRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, write_err};
use crate::domain::traffic::{TrafficData, TrafficDataRepository, TrafficQuery};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::traffic_data;
use crate::shared::PaginatedResult;

const DEFAULT_SEARCH_LIMIT: u64 = 100;

pub struct SeaOrmTrafficDataRepository {
    db: DatabaseConnection,
}

impl SeaOrmTrafficDataRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: traffic_data::Model) -> TrafficData {
    TrafficData {
        id: m.id,
        latitude: m.latitude,
        longitude: m.longitude,
        timestamp: m.timestamp,
        traffic_level: m.traffic_level,
        average_speed: m.average_speed,
        weather_condition: m.weather_condition,
        is_holiday: m.is_holiday,
        day_of_week: m.day_of_week,
        hour_of_day: m.hour_of_day,
        vehicle_count: m.vehicle_count,
        visibility: m.visibility,
        temperature: m.temperature,
        humidity: m.humidity,
        road_type: m.road_type,
        event_type: m.event_type,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(d: TrafficData) -> traffic_data::ActiveModel {
    traffic_data::ActiveModel {
        id: if d.id > 0 { Set(d.id) } else { NotSet },
        latitude: Set(d.latitude),
        longitude: Set(d.longitude),
        timestamp: Set(d.timestamp),
        traffic_level: Set(d.traffic_level),
        average_speed: Set(d.average_speed),
        weather_condition: Set(d.weather_condition),
        is_holiday: Set(d.is_holiday),
        day_of_week: Set(d.day_of_week),
        hour_of_day: Set(d.hour_of_day),
        vehicle_count: Set(d.vehicle_count),
        visibility: Set(d.visibility),
        temperature: Set(d.temperature),
        humidity: Set(d.humidity),
        road_type: Set(d.road_type),
        event_type: Set(d.event_type),
        created_at: Set(d.created_at),
        updated_at: Set(d.updated_at),
    }
}

#[async_trait]
impl TrafficDataRepository for SeaOrmTrafficDataRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<TrafficData>> {
        let m = traffic_data::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_page(&self, page: u64, limit: u64) -> DomainResult<PaginatedResult<TrafficData>> {
        let paginator = traffic_data::Entity::find()
            .order_by_desc(traffic_data::Column::Timestamp)
            .order_by_desc(traffic_data::Column::Id)
            .paginate(&self.db, limit.max(1));

        let total = paginator.num_items().await.map_err(db_err)?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            items.into_iter().map(model_to_domain).collect(),
            total,
            page,
            limit,
        ))
    }

    async fn find_nearby(
        &self,
        lat: f64,
        lng: f64,
        radius: f64,
        limit: u64,
    ) -> DomainResult<Vec<TrafficData>> {
        let models = traffic_data::Entity::find()
            .filter(traffic_data::Column::Latitude.between(lat - radius, lat + radius))
            .filter(traffic_data::Column::Longitude.between(lng - radius, lng + radius))
            .order_by_desc(traffic_data::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn search(&self, q: &TrafficQuery) -> DomainResult<Vec<TrafficData>> {
        let mut query = traffic_data::Entity::find();

        if let (Some(lat), Some(lng), Some(radius)) = (q.latitude, q.longitude, q.radius) {
            query = query
                .filter(traffic_data::Column::Latitude.between(lat - radius, lat + radius))
                .filter(traffic_data::Column::Longitude.between(lng - radius, lng + radius));
        }
        if let Some(start) = q.start_time {
            query = query.filter(traffic_data::Column::Timestamp.gte(start));
        }
        if let Some(end) = q.end_time {
            query = query.filter(traffic_data::Column::Timestamp.lte(end));
        }
        if let Some(min) = q.min_traffic_level {
            query = query.filter(traffic_data::Column::TrafficLevel.gte(min));
        }
        if let Some(max) = q.max_traffic_level {
            query = query.filter(traffic_data::Column::TrafficLevel.lte(max));
        }
        if let Some(ref weather) = q.weather_condition {
            query = query.filter(traffic_data::Column::WeatherCondition.eq(weather.as_str()));
        }
        if let Some(holiday) = q.is_holiday {
            query = query.filter(traffic_data::Column::IsHoliday.eq(holiday));
        }
        if let Some(day) = q.day_of_week {
            query = query.filter(traffic_data::Column::DayOfWeek.eq(day));
        }
        if let Some(hour) = q.hour_of_day {
            query = query.filter(traffic_data::Column::HourOfDay.eq(hour));
        }
        if let Some(ref road) = q.road_type {
            query = query.filter(traffic_data::Column::RoadType.eq(road.as_str()));
        }
        if let Some(ref event) = q.event_type {
            query = query.filter(traffic_data::Column::EventType.eq(event.as_str()));
        }

        let models = query
            .order_by_desc(traffic_data::Column::Timestamp)
            .limit(q.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_since(&self, since: DateTime<Utc>) -> DomainResult<Vec<TrafficData>> {
        let models = traffic_data::Entity::find()
            .filter(traffic_data::Column::Timestamp.gte(since))
            .order_by_desc(traffic_data::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, mut d: TrafficData) -> DomainResult<TrafficData> {
        d.id = 0;
        let model = domain_to_active(d)
            .insert(&self.db)
            .await
            .map_err(write_err("TrafficData"))?;
        debug!(
            "Recorded traffic level {} at ({}, {})",
            model.traffic_level, model.latitude, model.longitude
        );
        Ok(model_to_domain(model))
    }

    async fn update(&self, d: TrafficData) -> DomainResult<TrafficData> {
        let model = domain_to_active(d)
            .update(&self.db)
            .await
            .map_err(write_err("TrafficData"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = traffic_data::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("TrafficData", "id", id));
        }
        Ok(())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let res = traffic_data::Entity::delete_many()
            .filter(traffic_data::Column::Timestamp.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}

//! SeaORM implementation of ScheduleRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::schedule::{DayOfWeek, Schedule, ScheduleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::schedule;

pub struct SeaOrmScheduleRepository {
    db: DatabaseConnection,
}

impl SeaOrmScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: schedule::Model) -> Schedule {
    Schedule {
        id: m.id,
        bus_id: m.bus_id,
        driver_id: m.driver_id,
        route_id: m.route_id,
        day_of_week: DayOfWeek::from_str(&m.day_of_week).unwrap_or_else(|| DayOfWeek::of(m.departure_time)),
        departure_time: m.departure_time,
        arrival_time: m.arrival_time,
        estimated_duration_minutes: m.estimated_duration_minutes,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: Schedule) -> schedule::ActiveModel {
    schedule::ActiveModel {
        id: if s.id > 0 { Set(s.id) } else { NotSet },
        bus_id: Set(s.bus_id),
        driver_id: Set(s.driver_id),
        route_id: Set(s.route_id),
        day_of_week: Set(s.day_of_week.as_str().to_string()),
        departure_time: Set(s.departure_time),
        arrival_time: Set(s.arrival_time),
        estimated_duration_minutes: Set(s.estimated_duration_minutes),
        is_active: Set(s.is_active),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

#[async_trait]
impl ScheduleRepository for SeaOrmScheduleRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Schedule>> {
        let m = schedule::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Schedule>> {
        let models = schedule::Entity::find()
            .order_by_asc(schedule::Column::DepartureTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_bus(&self, bus_id: i64) -> DomainResult<Vec<Schedule>> {
        let models = schedule::Entity::find()
            .filter(schedule::Column::BusId.eq(bus_id))
            .order_by_asc(schedule::Column::DepartureTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_day(&self, day: DayOfWeek) -> DomainResult<Vec<Schedule>> {
        let models = schedule::Entity::find()
            .filter(schedule::Column::DayOfWeek.eq(day.as_str()))
            .order_by_asc(schedule::Column::DepartureTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, mut s: Schedule) -> DomainResult<Schedule> {
        s.id = 0;
        let model = domain_to_active(s)
            .insert(&self.db)
            .await
            .map_err(write_err("Schedule"))?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, s: Schedule) -> DomainResult<Schedule> {
        let model = domain_to_active(s)
            .update(&self.db)
            .await
            .map_err(write_err("Schedule"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = schedule::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Schedule", "id", id));
        }
        Ok(())
    }
}

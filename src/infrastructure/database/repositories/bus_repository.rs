//! SeaORM implementation of BusRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::bus::{Bus, BusRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::bus;

pub struct SeaOrmBusRepository {
    db: DatabaseConnection,
}

impl SeaOrmBusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: bus::Model) -> Bus {
    Bus {
        id: m.id,
        name: m.name,
        bus_line: m.bus_line,
        capacity: m.capacity,
        start_lat: m.start_lat,
        start_lng: m.start_lng,
        end_lat: m.end_lat,
        end_lng: m.end_lng,
        current_lat: m.current_lat,
        current_lng: m.current_lng,
        passengers: m.passengers,
        progress: m.progress,
        is_stopped: m.is_stopped,
        has_accident: m.has_accident,
        departure_time: m.departure_time,
        arrival_time: m.arrival_time,
        driver_id: m.driver_id,
        route_id: m.route_id,
        created_at: m.created_at,
    }
}

fn domain_to_active(b: Bus) -> bus::ActiveModel {
    bus::ActiveModel {
        id: if b.id > 0 { Set(b.id) } else { NotSet },
        name: Set(b.name),
        bus_line: Set(b.bus_line),
        capacity: Set(b.capacity),
        start_lat: Set(b.start_lat),
        start_lng: Set(b.start_lng),
        end_lat: Set(b.end_lat),
        end_lng: Set(b.end_lng),
        current_lat: Set(b.current_lat),
        current_lng: Set(b.current_lng),
        passengers: Set(b.passengers),
        progress: Set(b.progress),
        is_stopped: Set(b.is_stopped),
        has_accident: Set(b.has_accident),
        departure_time: Set(b.departure_time),
        arrival_time: Set(b.arrival_time),
        driver_id: Set(b.driver_id),
        route_id: Set(b.route_id),
        created_at: Set(b.created_at),
    }
}

#[async_trait]
impl BusRepository for SeaOrmBusRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Bus>> {
        let m = bus::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Bus>> {
        let models = bus::Entity::find()
            .order_by_asc(bus::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_driver(&self, driver_id: i64) -> DomainResult<Vec<Bus>> {
        let models = bus::Entity::find()
            .filter(bus::Column::DriverId.eq(driver_id))
            .order_by_asc(bus::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        bus::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn create(&self, mut b: Bus) -> DomainResult<Bus> {
        b.id = 0;
        let model = domain_to_active(b)
            .insert(&self.db)
            .await
            .map_err(write_err("Bus"))?;
        debug!("Created bus {} '{}'", model.id, model.name);
        Ok(model_to_domain(model))
    }

    async fn update(&self, b: Bus) -> DomainResult<Bus> {
        let model = domain_to_active(b)
            .update(&self.db)
            .await
            .map_err(write_err("Bus"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = bus::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Bus", "id", id));
        }
        Ok(())
    }
}

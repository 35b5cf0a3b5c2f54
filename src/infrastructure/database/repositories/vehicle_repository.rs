//! SeaORM implementations of VehicleRepository and VehicleLocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, write_err};
use crate::domain::vehicle::{
    FuelType, Vehicle, VehicleLocation, VehicleLocationRepository, VehicleRepository,
    VehicleStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{vehicle, vehicle_location};

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn vehicle_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        vehicle_number: m.vehicle_number,
        license_plate: m.license_plate,
        capacity: m.capacity,
        vehicle_type: m.vehicle_type,
        is_accessible: m.is_accessible,
        status: VehicleStatus::from_str(&m.status).unwrap_or(VehicleStatus::Inactive),
        manufacturer: m.manufacturer,
        model: m.model,
        year: m.year,
        fuel_type: m.fuel_type.as_deref().and_then(FuelType::from_str),
        has_air_conditioning: m.has_air_conditioning,
        has_wifi: m.has_wifi,
        has_gps: m.has_gps,
        odometer_reading: m.odometer_reading,
        last_maintenance: m.last_maintenance,
        next_maintenance: m.next_maintenance,
        current_passengers: m.current_passengers,
        route_id: m.route_id,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn vehicle_to_active(v: Vehicle) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: if v.id > 0 { Set(v.id) } else { NotSet },
        vehicle_number: Set(v.vehicle_number),
        license_plate: Set(v.license_plate),
        capacity: Set(v.capacity),
        vehicle_type: Set(v.vehicle_type),
        is_accessible: Set(v.is_accessible),
        status: Set(v.status.as_str().to_string()),
        manufacturer: Set(v.manufacturer),
        model: Set(v.model),
        year: Set(v.year),
        fuel_type: Set(v.fuel_type.map(|f| f.as_str().to_string())),
        has_air_conditioning: Set(v.has_air_conditioning),
        has_wifi: Set(v.has_wifi),
        has_gps: Set(v.has_gps),
        odometer_reading: Set(v.odometer_reading),
        last_maintenance: Set(v.last_maintenance),
        next_maintenance: Set(v.next_maintenance),
        current_passengers: Set(v.current_passengers),
        route_id: Set(v.route_id),
        is_active: Set(v.is_active),
        created_at: Set(v.created_at),
        updated_at: Set(v.updated_at),
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>> {
        let m = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(vehicle_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(vehicle_to_domain).collect())
    }

    async fn find_by_status(&self, status: VehicleStatus) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::Status.eq(status.as_str()))
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(vehicle_to_domain).collect())
    }

    async fn find_by_route(&self, route_id: i64) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::RouteId.eq(route_id))
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(vehicle_to_domain).collect())
    }

    async fn find_by_number(&self, vehicle_number: &str) -> DomainResult<Option<Vehicle>> {
        let m = vehicle::Entity::find()
            .filter(vehicle::Column::VehicleNumber.eq(vehicle_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(vehicle_to_domain))
    }

    async fn find_by_plate(&self, license_plate: &str) -> DomainResult<Option<Vehicle>> {
        let m = vehicle::Entity::find()
            .filter(vehicle::Column::LicensePlate.eq(license_plate))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(vehicle_to_domain))
    }

    async fn count(&self) -> DomainResult<u64> {
        vehicle::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn create(&self, mut v: Vehicle) -> DomainResult<Vehicle> {
        v.id = 0;
        let model = vehicle_to_active(v)
            .insert(&self.db)
            .await
            .map_err(write_err("Vehicle"))?;
        debug!("Created vehicle {} ({})", model.vehicle_number, model.license_plate);
        Ok(vehicle_to_domain(model))
    }

    async fn update(&self, v: Vehicle) -> DomainResult<Vehicle> {
        let model = vehicle_to_active(v)
            .update(&self.db)
            .await
            .map_err(write_err("Vehicle"))?;
        Ok(vehicle_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = vehicle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Vehicle", "id", id));
        }
        Ok(())
    }
}

pub struct SeaOrmVehicleLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn location_to_domain(m: vehicle_location::Model) -> VehicleLocation {
    VehicleLocation {
        id: m.id,
        vehicle_id: m.vehicle_id,
        latitude: m.latitude,
        longitude: m.longitude,
        speed: m.speed,
        heading: m.heading,
        recorded_at: m.recorded_at,
    }
}

#[async_trait]
impl VehicleLocationRepository for SeaOrmVehicleLocationRepository {
    async fn record(&self, l: VehicleLocation) -> DomainResult<VehicleLocation> {
        let active = vehicle_location::ActiveModel {
            id: NotSet,
            vehicle_id: Set(l.vehicle_id),
            latitude: Set(l.latitude),
            longitude: Set(l.longitude),
            speed: Set(l.speed),
            heading: Set(l.heading),
            recorded_at: Set(l.recorded_at),
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(location_to_domain(model))
    }

    async fn latest(&self, vehicle_id: i64) -> DomainResult<Option<VehicleLocation>> {
        let m = vehicle_location::Entity::find()
            .filter(vehicle_location::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(vehicle_location::Column::RecordedAt)
            .order_by_desc(vehicle_location::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(location_to_domain))
    }

    async fn history(&self, vehicle_id: i64, limit: u64) -> DomainResult<Vec<VehicleLocation>> {
        let models = vehicle_location::Entity::find()
            .filter(vehicle_location::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(vehicle_location::Column::RecordedAt)
            .order_by_desc(vehicle_location::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(location_to_domain).collect())
    }

    async fn find_since(&self, since: DateTime<Utc>) -> DomainResult<Vec<VehicleLocation>> {
        let models = vehicle_location::Entity::find()
            .filter(vehicle_location::Column::RecordedAt.gte(since))
            .order_by_desc(vehicle_location::Column::RecordedAt)
            .order_by_desc(vehicle_location::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(location_to_domain).collect())
    }
}

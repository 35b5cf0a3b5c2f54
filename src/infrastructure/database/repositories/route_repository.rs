//! SeaORM implementations of RouteRepository and StopRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::route::{Route, RouteRepository, RouteType, Stop, StopRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{route, stop};

pub struct SeaOrmRouteRepository {
    db: DatabaseConnection,
}

impl SeaOrmRouteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn route_to_domain(m: route::Model) -> Route {
    Route {
        id: m.id,
        route_name: m.route_name,
        route_code: m.route_code,
        description: m.description,
        total_distance: m.total_distance,
        estimated_duration: m.estimated_duration,
        color: m.color,
        route_type: RouteType::from_str(&m.route_type).unwrap_or(RouteType::Urban),
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn route_to_active(r: Route) -> route::ActiveModel {
    route::ActiveModel {
        id: if r.id > 0 { Set(r.id) } else { NotSet },
        route_name: Set(r.route_name),
        route_code: Set(r.route_code),
        description: Set(r.description),
        total_distance: Set(r.total_distance),
        estimated_duration: Set(r.estimated_duration),
        color: Set(r.color),
        route_type: Set(r.route_type.as_str().to_string()),
        is_active: Set(r.is_active),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

#[async_trait]
impl RouteRepository for SeaOrmRouteRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Route>> {
        let m = route::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(route_to_domain))
    }

    async fn find_by_code(&self, route_code: &str) -> DomainResult<Option<Route>> {
        let m = route::Entity::find()
            .filter(route::Column::RouteCode.eq(route_code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(route_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Route>> {
        let models = route::Entity::find()
            .order_by_asc(route::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(route_to_domain).collect())
    }

    async fn create(&self, mut r: Route) -> DomainResult<Route> {
        r.id = 0;
        let model = route_to_active(r)
            .insert(&self.db)
            .await
            .map_err(write_err("Route"))?;
        debug!("Created route {} '{}'", model.route_code, model.route_name);
        Ok(route_to_domain(model))
    }

    async fn update(&self, r: Route) -> DomainResult<Route> {
        let model = route_to_active(r)
            .update(&self.db)
            .await
            .map_err(write_err("Route"))?;
        Ok(route_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = route::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Route", "id", id));
        }
        Ok(())
    }
}

pub struct SeaOrmStopRepository {
    db: DatabaseConnection,
}

impl SeaOrmStopRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn stop_to_domain(m: stop::Model) -> Stop {
    Stop {
        id: m.id,
        route_id: m.route_id,
        stop_name: m.stop_name,
        stop_code: m.stop_code,
        latitude: m.latitude,
        longitude: m.longitude,
        sequence_order: m.sequence_order,
        has_shelter: m.has_shelter,
        is_accessible: m.is_accessible,
        zone: m.zone,
        is_active: m.is_active,
    }
}

#[async_trait]
impl StopRepository for SeaOrmStopRepository {
    async fn find_by_route(&self, route_id: i64) -> DomainResult<Vec<Stop>> {
        let models = stop::Entity::find()
            .filter(stop::Column::RouteId.eq(route_id))
            .order_by_asc(stop::Column::SequenceOrder)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(stop_to_domain).collect())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Stop>> {
        let m = stop::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(stop_to_domain))
    }

    async fn create(&self, s: Stop) -> DomainResult<Stop> {
        let active = stop::ActiveModel {
            id: NotSet,
            route_id: Set(s.route_id),
            stop_name: Set(s.stop_name),
            stop_code: Set(s.stop_code),
            latitude: Set(s.latitude),
            longitude: Set(s.longitude),
            sequence_order: Set(s.sequence_order),
            has_shelter: Set(s.has_shelter),
            is_accessible: Set(s.is_accessible),
            zone: Set(s.zone),
            is_active: Set(s.is_active),
        };
        let model = active.insert(&self.db).await.map_err(write_err("Stop"))?;
        Ok(stop_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = stop::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Stop", "id", id));
        }
        Ok(())
    }
}

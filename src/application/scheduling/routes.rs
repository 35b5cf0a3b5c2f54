//! Routes and their ordered stops

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::route::{next_sequence_order, Route, RouteType, Stop};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::non_blank;

#[derive(Debug, Clone, Default)]
pub struct RouteInput {
    pub route_name: Option<String>,
    pub route_code: Option<String>,
    pub description: Option<String>,
    pub total_distance: Option<f64>,
    pub estimated_duration: Option<i32>,
    pub color: Option<String>,
    pub route_type: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct StopInput {
    pub stop_name: Option<String>,
    pub stop_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sequence_order: Option<i32>,
    pub has_shelter: Option<bool>,
    pub is_accessible: Option<bool>,
    pub zone: Option<String>,
}

pub struct RouteService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RouteService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Route> {
        self.repos
            .routes()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Route", "id", id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Route>> {
        self.repos.routes().find_all().await
    }

    async fn ensure_code_free(&self, code: &str, own_id: i64) -> DomainResult<()> {
        match self.repos.routes().find_by_code(code).await? {
            Some(other) if other.id != own_id => Err(DomainError::Conflict(format!(
                "Route code already exists: {}",
                code
            ))),
            _ => Ok(()),
        }
    }

    fn apply(route: &mut Route, input: RouteInput) -> DomainResult<()> {
        if let Some(v) = non_blank(input.route_name.as_deref()) {
            route.route_name = v.to_string();
        }
        if let Some(v) = non_blank(input.route_code.as_deref()) {
            route.route_code = v.to_string();
        }
        if let Some(v) = input.description {
            route.description = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(d) = input.total_distance {
            if d < 0.0 {
                return Err(DomainError::Validation("Total distance cannot be negative".into()));
            }
            route.total_distance = Some(d);
        }
        if let Some(d) = input.estimated_duration {
            if d <= 0 {
                return Err(DomainError::Validation("Estimated duration must be positive".into()));
            }
            route.estimated_duration = Some(d);
        }
        if let Some(v) = input.color {
            route.color = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = non_blank(input.route_type.as_deref()) {
            route.route_type = RouteType::parse(v)?;
        }
        if let Some(v) = input.is_active {
            route.is_active = v;
        }
        Ok(())
    }

    pub async fn create(&self, input: RouteInput) -> DomainResult<Route> {
        let name = non_blank(input.route_name.as_deref())
            .ok_or_else(|| DomainError::Validation("Route name is required".into()))?;
        let code = non_blank(input.route_code.as_deref())
            .ok_or_else(|| DomainError::Validation("Route code is required".into()))?;

        let mut route = Route::new(name, code, RouteType::Urban);
        Self::apply(&mut route, input)?;
        self.ensure_code_free(&route.route_code, 0).await?;

        let route = self.repos.routes().create(route).await?;
        info!(route_id = route.id, code = %route.route_code, "Route created");
        Ok(route)
    }

    pub async fn update(&self, id: i64, input: RouteInput) -> DomainResult<Route> {
        let mut route = self.get(id).await?;
        Self::apply(&mut route, input)?;
        self.ensure_code_free(&route.route_code, route.id).await?;
        route.updated_at = Utc::now();
        self.repos.routes().update(route).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.routes().delete(id).await
    }

    // ── Stops ─────────────────────────────────────────────────

    pub async fn stops(&self, route_id: i64) -> DomainResult<Vec<Stop>> {
        self.get(route_id).await?;
        let mut stops = self.repos.stops().find_by_route(route_id).await?;
        stops.sort_by_key(|s| s.sequence_order);
        Ok(stops)
    }

    pub async fn add_stop(&self, route_id: i64, input: StopInput) -> DomainResult<Stop> {
        let stop_name = non_blank(input.stop_name.as_deref())
            .ok_or_else(|| DomainError::Validation("Stop name is required".into()))?
            .to_string();
        let (Some(latitude), Some(longitude)) = (input.latitude, input.longitude) else {
            return Err(DomainError::Validation("Stop coordinates are required".into()));
        };

        let existing = self.stops(route_id).await?;
        let sequence_order = match input.sequence_order {
            Some(order) if order > 0 => order,
            Some(_) => {
                return Err(DomainError::Validation("Sequence order must be positive".into()))
            }
            None => next_sequence_order(&existing),
        };

        let stop = self
            .repos
            .stops()
            .create(Stop {
                id: 0,
                route_id,
                stop_name,
                stop_code: non_blank(input.stop_code.as_deref()).map(str::to_string),
                latitude,
                longitude,
                sequence_order,
                has_shelter: input.has_shelter.unwrap_or(false),
                is_accessible: input.is_accessible.unwrap_or(false),
                zone: non_blank(input.zone.as_deref()).map(str::to_string),
                is_active: true,
            })
            .await?;
        info!(route_id, stop_id = stop.id, order = stop.sequence_order, "Stop added");
        Ok(stop)
    }

    pub async fn remove_stop(&self, route_id: i64, stop_id: i64) -> DomainResult<()> {
        let stop = self
            .repos
            .stops()
            .find_by_id(stop_id)
            .await?
            .filter(|s| s.route_id == route_id)
            .ok_or_else(|| DomainError::not_found("Stop", "id", stop_id))?;
        self.repos.stops().delete(stop.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::repositories;

    fn route(code: &str) -> RouteInput {
        RouteInput {
            route_name: Some("Gare Centrale - Matete".into()),
            route_code: Some(code.into()),
            route_type: Some("express".into()),
            ..Default::default()
        }
    }

    fn stop(name: &str, order: Option<i32>) -> StopInput {
        StopInput {
            stop_name: Some(name.into()),
            latitude: Some(-4.3),
            longitude: Some(15.3),
            sequence_order: order,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn route_codes_are_unique() {
        let svc = RouteService::new(repositories().await);
        let r = svc.create(route("GC-MT")).await.unwrap();
        assert_eq!(r.route_type, RouteType::Express);
        assert!(matches!(svc.create(route("GC-MT")).await, Err(DomainError::Conflict(_))));
        assert!(matches!(
            svc.create(RouteInput { route_type: Some("ferry".into()), ..route("X") }).await,
            Err(DomainError::Validation(_))
        ));

        let other = svc.create(route("GC-LM")).await.unwrap();
        assert!(matches!(
            svc.update(other.id, RouteInput { route_code: Some("GC-MT".into()), ..Default::default() }).await,
            Err(DomainError::Conflict(_))
        ));
        svc.update(r.id, route("GC-MT")).await.unwrap();
    }

    #[tokio::test]
    async fn stops_append_in_sequence() {
        let svc = RouteService::new(repositories().await);
        let r = svc.create(route("L2")).await.unwrap();

        let first = svc.add_stop(r.id, stop("Gare Centrale", None)).await.unwrap();
        assert_eq!(first.sequence_order, 1);
        svc.add_stop(r.id, stop("Victoire", Some(5))).await.unwrap();
        let third = svc.add_stop(r.id, stop("Matete", None)).await.unwrap();
        assert_eq!(third.sequence_order, 6);

        let orders: Vec<i32> = svc.stops(r.id).await.unwrap().iter().map(|s| s.sequence_order).collect();
        assert_eq!(orders, vec![1, 5, 6]);

        assert!(matches!(
            svc.remove_stop(r.id + 1, first.id).await,
            Err(DomainError::NotFound { .. })
        ));
        svc.remove_stop(r.id, first.id).await.unwrap();
        assert_eq!(svc.stops(r.id).await.unwrap().len(), 2);
        assert!(matches!(svc.stops(999).await, Err(DomainError::NotFound { .. })));
    }
}

//! SeaORM implementation of StaffRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::staff::{Staff, StaffRepository, StaffRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::staff;

pub struct SeaOrmStaffRepository {
    db: DatabaseConnection,
}

impl SeaOrmStaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: staff::Model) -> Staff {
    Staff {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        phone_number: m.phone_number,
        password_hash: m.password_hash,
        role: StaffRole::from_str(&m.role).unwrap_or(StaffRole::Passenger),
        active: m.active,
        reset_token: m.reset_token,
        reset_token_expiration: m.reset_token_expiration,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: Staff) -> staff::ActiveModel {
    staff::ActiveModel {
        id: if s.id > 0 { Set(s.id) } else { NotSet },
        first_name: Set(s.first_name),
        last_name: Set(s.last_name),
        email: Set(crate::shared::normalize_email(&s.email)),
        phone_number: Set(s.phone_number),
        password_hash: Set(s.password_hash),
        role: Set(s.role.as_str().to_string()),
        active: Set(s.active),
        reset_token: Set(s.reset_token),
        reset_token_expiration: Set(s.reset_token_expiration),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

#[async_trait]
impl StaffRepository for SeaOrmStaffRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Staff>> {
        let m = staff::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Staff>> {
        let email = crate::shared::normalize_email(email);
        let m = staff::Entity::find()
            .filter(staff::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Staff>> {
        let models = staff::Entity::find()
            .order_by_asc(staff::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_role(&self, role: StaffRole) -> DomainResult<Vec<Staff>> {
        let models = staff::Entity::find()
            .filter(staff::Column::Role.eq(role.as_str()))
            .order_by_asc(staff::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_by_role(&self, role: StaffRole) -> DomainResult<Vec<Staff>> {
        let models = staff::Entity::find()
            .filter(staff::Column::Role.eq(role.as_str()))
            .filter(staff::Column::Active.eq(true))
            .order_by_asc(staff::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        let email = crate::shared::normalize_email(email);
        let count = staff::Entity::find()
            .filter(staff::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn count(&self) -> DomainResult<u64> {
        staff::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn create(&self, mut s: Staff) -> DomainResult<Staff> {
        s.id = 0;
        let model = domain_to_active(s)
            .insert(&self.db)
            .await
            .map_err(write_err("Staff"))?;
        debug!("Created staff {} ({})", model.id, model.role);
        Ok(model_to_domain(model))
    }

    async fn update(&self, s: Staff) -> DomainResult<Staff> {
        if s.id <= 0 {
            return Err(DomainError::Validation("Staff id is required".into()));
        }
        let model = domain_to_active(s)
            .update(&self.db)
            .await
            .map_err(write_err("Staff"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = staff::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Staff", "id", id));
        }
        Ok(())
    }
}

//! SeaORM implementation of SparePartRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::spare_part::{SparePart, SparePartRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::spare_part;

pub struct SeaOrmSparePartRepository {
    db: DatabaseConnection,
}

impl SeaOrmSparePartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: spare_part::Model) -> SparePart {
    SparePart {
        id: m.id,
        part_number: m.part_number,
        name: m.name,
        description: m.description,
        quantity: m.quantity,
        minimum_stock_level: m.minimum_stock_level,
        location: m.location,
        supplier: m.supplier,
        unit_price: m.unit_price,
        category: m.category,
    }
}

fn domain_to_active(p: SparePart) -> spare_part::ActiveModel {
    spare_part::ActiveModel {
        id: if p.id > 0 { Set(p.id) } else { NotSet },
        part_number: Set(p.part_number),
        name: Set(p.name),
        description: Set(p.description),
        quantity: Set(p.quantity),
        minimum_stock_level: Set(p.minimum_stock_level),
        location: Set(p.location),
        supplier: Set(p.supplier),
        unit_price: Set(p.unit_price),
        category: Set(p.category),
    }
}

#[async_trait]
impl SparePartRepository for SeaOrmSparePartRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<SparePart>> {
        let m = spare_part::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_by_part_number(&self, part_number: &str) -> DomainResult<Option<SparePart>> {
        let m = spare_part::Entity::find()
            .filter(spare_part::Column::PartNumber.eq(part_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<SparePart>> {
        let models = spare_part::Entity::find()
            .order_by_asc(spare_part::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<SparePart>> {
        let models = spare_part::Entity::find()
            .filter(spare_part::Column::Category.eq(category))
            .order_by_asc(spare_part::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn search(&self, query: &str) -> DomainResult<Vec<SparePart>> {
        let models = spare_part::Entity::find()
            .filter(
                Condition::any()
                    .add(spare_part::Column::Name.contains(query))
                    .add(spare_part::Column::PartNumber.contains(query))
                    .add(spare_part::Column::Description.contains(query)),
            )
            .order_by_asc(spare_part::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, mut p: SparePart) -> DomainResult<SparePart> {
        p.id = 0;
        let model = domain_to_active(p)
            .insert(&self.db)
            .await
            .map_err(write_err("SparePart"))?;
        debug!("Created spare part {} ({})", model.part_number, model.name);
        Ok(model_to_domain(model))
    }

    async fn update(&self, p: SparePart) -> DomainResult<SparePart> {
        let model = domain_to_active(p)
            .update(&self.db)
            .await
            .map_err(write_err("SparePart"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let res = spare_part::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("SparePart", "id", id));
        }
        Ok(())
    }
}

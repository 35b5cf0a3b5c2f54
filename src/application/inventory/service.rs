//! Spare-part stock keeping

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::spare_part::SparePart;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::non_blank;

#[derive(Debug, Clone, Default)]
pub struct SparePartInput {
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub minimum_stock_level: Option<i32>,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
}

pub struct InventoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl InventoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get(&self, id: i64) -> DomainResult<SparePart> {
        self.repos
            .spare_parts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("SparePart", "id", id))
    }

    pub async fn by_part_number(&self, part_number: &str) -> DomainResult<SparePart> {
        self.repos
            .spare_parts()
            .find_by_part_number(part_number)
            .await?
            .ok_or_else(|| DomainError::not_found("SparePart", "partNumber", part_number))
    }

    pub async fn list(&self) -> DomainResult<Vec<SparePart>> {
        self.repos.spare_parts().find_all().await
    }

    pub async fn by_category(&self, category: &str) -> DomainResult<Vec<SparePart>> {
        self.repos.spare_parts().find_by_category(category).await
    }

    /// Distinct non-empty categories, sorted
    pub async fn categories(&self) -> DomainResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .list()
            .await?
            .into_iter()
            .filter_map(|p| p.category)
            .filter(|c| !c.trim().is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }

    pub async fn search(&self, query: &str) -> DomainResult<Vec<SparePart>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list().await;
        }
        self.repos.spare_parts().search(query).await
    }

    pub async fn low_stock(&self) -> DomainResult<Vec<SparePart>> {
        Ok(self.list().await?.into_iter().filter(SparePart::is_low_stock).collect())
    }

    pub async fn out_of_stock(&self) -> DomainResult<Vec<SparePart>> {
        Ok(self.list().await?.into_iter().filter(SparePart::is_out_of_stock).collect())
    }

    fn apply(part: &mut SparePart, input: SparePartInput) -> DomainResult<()> {
        if let Some(v) = non_blank(input.part_number.as_deref()) {
            part.part_number = v.to_string();
        }
        if let Some(v) = non_blank(input.name.as_deref()) {
            part.name = v.to_string();
        }
        if let Some(v) = input.description {
            part.description = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(q) = input.quantity {
            if q < 0 {
                return Err(DomainError::Validation("Quantity cannot be negative".into()));
            }
            part.quantity = q;
        }
        if let Some(m) = input.minimum_stock_level {
            if m < 0 {
                return Err(DomainError::Validation(
                    "Minimum stock level cannot be negative".into(),
                ));
            }
            part.minimum_stock_level = m;
        }
        if let Some(v) = input.location {
            part.location = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = input.supplier {
            part.supplier = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(p) = input.unit_price {
            if p < 0.0 {
                return Err(DomainError::Validation("Unit price cannot be negative".into()));
            }
            part.unit_price = Some(p);
        }
        if let Some(v) = input.category {
            part.category = non_blank(Some(&v)).map(str::to_string);
        }
        Ok(())
    }

    async fn ensure_number_free(&self, part_number: &str, own_id: i64) -> DomainResult<()> {
        match self.repos.spare_parts().find_by_part_number(part_number).await? {
            Some(other) if other.id != own_id => Err(DomainError::Conflict(format!(
                "Part number already exists: {}",
                part_number
            ))),
            _ => Ok(()),
        }
    }

    pub async fn create(&self, input: SparePartInput) -> DomainResult<SparePart> {
        let part_number = non_blank(input.part_number.as_deref())
            .ok_or_else(|| DomainError::Validation("Part number is required".into()))?
            .to_string();
        let name = non_blank(input.name.as_deref())
            .ok_or_else(|| DomainError::Validation("Name is required".into()))?
            .to_string();

        let mut part = SparePart {
            id: 0,
            part_number,
            name,
            description: None,
            quantity: 0,
            minimum_stock_level: 0,
            location: None,
            supplier: None,
            unit_price: None,
            category: None,
        };
        Self::apply(&mut part, input)?;
        self.ensure_number_free(&part.part_number, 0).await?;

        let part = self.repos.spare_parts().create(part).await?;
        info!(part_id = part.id, part_number = %part.part_number, "Spare part created");
        Ok(part)
    }

    pub async fn update(&self, id: i64, input: SparePartInput) -> DomainResult<SparePart> {
        let mut part = self.get(id).await?;
        Self::apply(&mut part, input)?;
        self.ensure_number_free(&part.part_number, part.id).await?;
        self.repos.spare_parts().update(part).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.spare_parts().delete(id).await
    }

    pub async fn decrease_stock(&self, id: i64, quantity: i32) -> DomainResult<SparePart> {
        let mut part = self.get(id).await?;
        part.decrease(quantity)?;
        let part = self.repos.spare_parts().update(part).await?;
        if part.is_out_of_stock() {
            warn!(part_id = id, part_number = %part.part_number, "Spare part out of stock");
        } else if part.is_low_stock() {
            warn!(part_id = id, quantity = part.quantity, "Spare part below minimum stock");
        }
        Ok(part)
    }

    pub async fn increase_stock(&self, id: i64, quantity: i32) -> DomainResult<SparePart> {
        let mut part = self.get(id).await?;
        part.increase(quantity)?;
        self.repos.spare_parts().update(part).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::repositories;

    fn part(number: &str, quantity: i32, category: &str) -> SparePartInput {
        SparePartInput {
            part_number: Some(number.into()),
            name: Some(format!("Brake pad {}", number)),
            quantity: Some(quantity),
            minimum_stock_level: Some(5),
            category: Some(category.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn crud_and_duplicate_part_numbers() {
        let svc = InventoryService::new(repositories().await);
        let p = svc.create(part("BP-01", 10, "Brakes")).await.unwrap();
        assert!(matches!(svc.create(part("BP-01", 1, "Brakes")).await, Err(DomainError::Conflict(_))));
        assert!(matches!(
            svc.create(SparePartInput { name: None, ..part("BP-02", 1, "x") }).await,
            Err(DomainError::Validation(_))
        ));

        assert_eq!(svc.by_part_number("BP-01").await.unwrap().id, p.id);
        assert!(matches!(svc.by_part_number("nope").await, Err(DomainError::NotFound { .. })));

        let moved = svc
            .update(p.id, SparePartInput { location: Some("Depot A".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(moved.location.as_deref(), Some("Depot A"));

        svc.delete(p.id).await.unwrap();
        assert!(matches!(svc.delete(p.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn stock_levels() {
        let svc = InventoryService::new(repositories().await);
        let p = svc.create(part("F-1", 6, "Filters")).await.unwrap();
        svc.create(part("F-2", 0, "Filters")).await.unwrap();
        svc.create(part("T-1", 20, "Tyres")).await.unwrap();

        assert!(svc.low_stock().await.unwrap().is_empty());
        assert_eq!(svc.out_of_stock().await.unwrap().len(), 1);

        assert!(matches!(svc.decrease_stock(p.id, 7).await, Err(DomainError::Validation(_))));
        let p = svc.decrease_stock(p.id, 2).await.unwrap();
        assert_eq!(p.quantity, 4);
        assert_eq!(svc.low_stock().await.unwrap().len(), 1);

        let p = svc.increase_stock(p.id, 10).await.unwrap();
        assert_eq!(p.quantity, 14);
        assert!(svc.increase_stock(p.id, 0).await.is_err());

        assert_eq!(svc.categories().await.unwrap(), vec!["Filters", "Tyres"]);
        assert_eq!(svc.by_category("Filters").await.unwrap().len(), 2);
        assert_eq!(svc.search("T-1").await.unwrap().len(), 1);
    }
}

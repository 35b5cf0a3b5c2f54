//! Spare part domain entity

use crate::domain::{DomainError, DomainResult};

/// A stocked spare part
#[derive(Debug, Clone)]
pub struct SparePart {
    pub id: i64,
    /// Unique
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub minimum_stock_level: i32,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
}

impl SparePart {
    /// In stock but at or below the minimum level
    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.minimum_stock_level
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    pub fn decrease(&mut self, amount: i32) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::Validation("Quantity must be positive".into()));
        }
        if amount > self.quantity {
            return Err(DomainError::Validation(format!(
                "Insufficient stock for part {}: {} available, {} requested",
                self.part_number, self.quantity, amount
            )));
        }
        self.quantity -= amount;
        Ok(())
    }

    pub fn increase(&mut self, amount: i32) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::Validation("Quantity must be positive".into()));
        }
        self.quantity = self.quantity.saturating_add(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(quantity: i32, minimum: i32) -> SparePart {
        SparePart {
            id: 1,
            part_number: "BRK-001".into(),
            name: "Brake pad".into(),
            description: None,
            quantity,
            minimum_stock_level: minimum,
            location: None,
            supplier: None,
            unit_price: Some(45.0),
            category: Some("Brakes".into()),
        }
    }

    #[test]
    fn stock_levels() {
        assert!(part(3, 5).is_low_stock());
        assert!(part(5, 5).is_low_stock());
        assert!(!part(6, 5).is_low_stock());
        assert!(!part(0, 5).is_low_stock());
        assert!(part(0, 5).is_out_of_stock());
    }

    #[test]
    fn cannot_take_more_than_available() {
        let mut p = part(2, 1);
        assert!(p.decrease(3).is_err());
        assert!(p.decrease(0).is_err());
        p.decrease(2).unwrap();
        assert!(p.is_out_of_stock());
        p.increase(4).unwrap();
        assert_eq!(p.quantity, 4);
    }
}

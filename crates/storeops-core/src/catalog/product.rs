//! Product types.

use crate::error::RetailError;
use crate::ids::ProductCode;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products priced by weight carry a `price_per_kg`; everything else is
/// sold at `price` per unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// EAN-13 barcode, the product's identity everywhere in the system.
    pub code: ProductCode,
    /// Product name.
    pub name: String,
    /// Brand.
    pub brand: String,
    /// Category (e.g., "Groceries", "Hygiene").
    pub category: String,
    /// Package weight in kilograms.
    pub weight_kg: f64,
    /// Unit price.
    pub price: Money,
    /// Per-kilogram price for weight-priced products.
    pub price_per_kg: Option<Money>,
}

impl Product {
    /// Create a new unit-priced product.
    pub fn new(
        code: ProductCode,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        weight_kg: f64,
        price: Money,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            weight_kg,
            price,
            price_per_kg: None,
        }
    }

    /// Mark this product as priced by weight.
    pub fn with_price_per_kg(mut self, price_per_kg: Money) -> Self {
        self.price_per_kg = Some(price_per_kg);
        self
    }

    /// Check if this product is priced by weight.
    pub fn is_weight_priced(&self) -> bool {
        self.price_per_kg.is_some()
    }

    /// Compute the total price for a quantity of this product.
    ///
    /// Weight-priced products charge per-kg price times package weight;
    /// everything else charges the unit price. Zero quantity is rejected.
    pub fn price_for(&self, quantity: u32) -> Result<Money, RetailError> {
        if quantity == 0 {
            return Err(RetailError::InvalidQuantity(quantity));
        }
        match self.price_per_kg {
            Some(per_kg) => Ok(per_kg.multiply_decimal(self.weight_kg * quantity as f64)),
            None => self
                .price
                .try_multiply(quantity as i64)
                .ok_or(RetailError::Overflow),
        }
    }

    /// Apply a typed field update.
    pub fn apply(&mut self, update: ProductUpdate) {
        match update {
            ProductUpdate::Name(name) => self.name = name,
            ProductUpdate::Brand(brand) => self.brand = brand,
            ProductUpdate::Category(category) => self.category = category,
            ProductUpdate::WeightKg(weight_kg) => self.weight_kg = weight_kg,
            ProductUpdate::Price(price) => self.price = price,
            ProductUpdate::PricePerKg(price_per_kg) => self.price_per_kg = price_per_kg,
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.name, self.brand, self.category, self.code
        )?;
        match self.price_per_kg {
            Some(per_kg) => write!(f, " | {}/kg", per_kg),
            None => write!(f, " | {}", self.price),
        }
    }
}

/// A typed field update for a product.
///
/// Replaces attribute-name-keyed updates with one variant per editable
/// field; the barcode is identity and cannot be changed.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductUpdate {
    Name(String),
    Brand(String),
    Category(String),
    WeightKg(f64),
    Price(Money),
    PricePerKg(Option<Money>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn sample() -> Product {
        Product::new(
            ProductCode::new("7891000100103"),
            "Chocolate Mix",
            "Nescau",
            "Groceries",
            0.4,
            Money::new(1250, Currency::BRL),
        )
    }

    #[test]
    fn test_unit_price_for_quantity() {
        let p = sample();
        assert_eq!(p.price_for(3).unwrap().amount_cents, 3750);
    }

    #[test]
    fn test_weight_priced() {
        let p = sample().with_price_per_kg(Money::new(2000, Currency::BRL));
        assert!(p.is_weight_priced());
        // 0.4 kg * 2 units * R$20.00/kg = R$16.00
        assert_eq!(p.price_for(2).unwrap().amount_cents, 1600);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let p = sample();
        assert!(matches!(
            p.price_for(0),
            Err(RetailError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_apply_update() {
        let mut p = sample();
        p.apply(ProductUpdate::Price(Money::new(999, Currency::BRL)));
        p.apply(ProductUpdate::Brand("Toddy".to_string()));
        assert_eq!(p.price.amount_cents, 999);
        assert_eq!(p.brand, "Toddy");
    }
}

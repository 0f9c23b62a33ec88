//! Sale cart and line item types.

use crate::catalog::Catalog;
use crate::error::RetailError;
use crate::ids::{EmployeeId, ProductCode, SaleId};
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Barcode of the product being sold.
    pub code: ProductCode,
    /// Units of that product.
    pub quantity: u32,
}

/// A sale in progress, and once finalized, a sale record.
///
/// A cart accumulates lines, gets priced against a catalog, and is then
/// finalized with the date and cashier. `total` is a cache of the last
/// pricing pass; line edits clear it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Unique sale identifier.
    pub id: SaleId,
    /// Products in the cart, one line per product code.
    pub lines: Vec<SaleLine>,
    /// Total at finalization time, absent while the sale is open.
    pub total: Option<Money>,
    /// Date the sale was closed.
    #[serde(with = "crate::dates::optional")]
    pub finalized_on: Option<NaiveDate>,
    /// Employee who rang the sale up.
    pub cashier: Option<EmployeeId>,
}

impl Cart {
    /// Create an empty, open cart.
    pub fn new(id: SaleId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            total: None,
            finalized_on: None,
            cashier: None,
        }
    }

    /// Add units of a product, merging into an existing line if present.
    pub fn add_line(&mut self, code: ProductCode, quantity: u32) -> Result<(), RetailError> {
        if quantity == 0 {
            return Err(RetailError::InvalidQuantity(quantity));
        }
        self.total = None;

        if let Some(existing) = self.lines.iter_mut().find(|line| line.code == code) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(RetailError::Overflow)?;
            return Ok(());
        }

        self.lines.push(SaleLine { code, quantity });
        Ok(())
    }

    /// Remove units of a product; removing at least the line's current
    /// quantity drops the line entirely.
    pub fn remove_line(&mut self, code: &ProductCode, quantity: u32) -> Result<(), RetailError> {
        let position = self
            .lines
            .iter()
            .position(|line| &line.code == code)
            .ok_or_else(|| RetailError::ItemNotInCart(code.to_string()))?;

        self.total = None;
        if quantity >= self.lines[position].quantity {
            self.lines.remove(position);
        } else {
            self.lines[position].quantity -= quantity;
        }
        Ok(())
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = None;
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized_on.is_some()
    }

    /// Price the cart against a catalog and cache the result.
    ///
    /// Every line's product must exist; weight-priced products are
    /// priced by their per-kilogram rate.
    pub fn compute_total(&mut self, catalog: &Catalog) -> Result<Money, RetailError> {
        let mut line_totals = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let product = catalog.get(&line.code)?;
            line_totals.push(product.price_for(line.quantity)?);
        }
        let total = Money::try_sum(line_totals, Default::default())?;
        self.total = Some(total);
        Ok(total)
    }

    /// Close the sale: fix the total and record the date, and the
    /// cashier when one rang the sale up. `None` is a self-checkout
    /// sale.
    pub fn finalize(
        &mut self,
        catalog: &Catalog,
        date: NaiveDate,
        cashier: Option<EmployeeId>,
    ) -> Result<Money, RetailError> {
        if self.is_empty() {
            return Err(RetailError::Validation("cannot finalize an empty sale".into()));
        }
        let total = self.compute_total(catalog)?;
        self.total = Some(total);
        self.finalized_on = Some(date);
        self.cashier = cashier;
        Ok(total)
    }
}

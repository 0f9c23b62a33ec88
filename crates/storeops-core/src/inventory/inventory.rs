//! The two-pool inventory engine.
//!
//! An [`Inventory`] tracks, per product, how many units sit in back-room
//! storage (`stock`) and how many are placed on the sales floor
//! (`exposure`), each pool bounded by a per-product capacity. Sales
//! consume exposure; restocking fills stock; `move_to_exposure` shifts
//! units between the pools.

use crate::error::RetailError;
use crate::ids::{InventoryCode, ProductCode};
use std::collections::BTreeMap;
use std::fmt;

/// The two quantity pools of an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Back-room storage.
    Stock,
    /// Sales-floor display.
    Exposure,
}

impl Pool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::Stock => "stock",
            Pool::Exposure => "exposure",
        }
    }

}

impl std::str::FromStr for Pool {
    type Err = RetailError;

    /// Anything other than "stock" or "exposure" is an invalid
    /// destination; this is the boundary where stringly-typed input
    /// (CLI flags, config) enters the system.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" => Ok(Pool::Stock),
            "exposure" => Ok(Pool::Exposure),
            other => Err(RetailError::InvalidDestination(other.to_string())),
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which pool(s) a missing-products listing inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingScope {
    /// Zero in stock.
    Stock,
    /// Zero in exposure.
    Exposure,
    /// Zero in either pool (logical OR).
    Both,
}

impl std::str::FromStr for MissingScope {
    type Err = RetailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" => Ok(MissingScope::Stock),
            "exposure" => Ok(MissingScope::Exposure),
            "both" => Ok(MissingScope::Both),
            other => Err(RetailError::Validation(format!(
                "invalid scope '{}': use 'stock', 'exposure' or 'both'",
                other
            ))),
        }
    }
}

/// Per-product capacity limits, one per pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capacity {
    /// Maximum units allowed in stock.
    pub stock_limit: u32,
    /// Maximum units allowed in exposure.
    pub exposure_limit: u32,
}

impl Capacity {
    pub fn new(stock_limit: u32, exposure_limit: u32) -> Self {
        Self {
            stock_limit,
            exposure_limit,
        }
    }

    fn limit(&self, pool: Pool) -> u32 {
        match pool {
            Pool::Stock => self.stock_limit,
            Pool::Exposure => self.exposure_limit,
        }
    }
}

/// Snapshot of one product's quantities and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ProductLevels {
    pub stock: u32,
    pub exposure: u32,
    pub stock_limit: u32,
    pub exposure_limit: u32,
}

/// Occupancy percentages for one product, rounded to 2 decimal places.
///
/// A pool with a zero limit reports 0.0 occupancy.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Occupancy {
    pub stock_pct: f64,
    pub exposure_pct: f64,
}

/// A store's inventory: three parallel mappings keyed by product code.
///
/// A product is *registered* iff it has a `capacity` entry; registration
/// also creates zeroed `stock` and `exposure` entries, and removal
/// (only legal at zero quantities) erases all three. Capacity edits may
/// leave a quantity above its limit; that state is deliberately not
/// prevented here and is surfaced only by
/// [`check_consistency`](super::audit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    code: InventoryCode,
    pub(super) stock: BTreeMap<ProductCode, u32>,
    pub(super) exposure: BTreeMap<ProductCode, u32>,
    pub(super) capacity: BTreeMap<ProductCode, Capacity>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new(code: InventoryCode) -> Self {
        Self {
            code,
            stock: BTreeMap::new(),
            exposure: BTreeMap::new(),
            capacity: BTreeMap::new(),
        }
    }

    /// This inventory's identifier.
    pub fn code(&self) -> &InventoryCode {
        &self.code
    }

    /// Register a product with zero quantities and the given limits.
    pub fn register(&mut self, code: ProductCode, capacity: Capacity) -> Result<(), RetailError> {
        if self.capacity.contains_key(&code) {
            return Err(RetailError::AlreadyRegistered(code.to_string()));
        }
        self.stock.insert(code.clone(), 0);
        self.exposure.insert(code.clone(), 0);
        self.capacity.insert(code, capacity);
        Ok(())
    }

    /// Check whether a product is registered.
    pub fn is_registered(&self, code: &ProductCode) -> bool {
        self.capacity.contains_key(code)
    }

    /// Update one or both capacity limits for a registered product.
    ///
    /// A limit may be set below the current quantity; the resulting
    /// over-limit state is reported by the consistency audit, not here.
    pub fn update_capacity(
        &mut self,
        code: &ProductCode,
        stock_limit: Option<u32>,
        exposure_limit: Option<u32>,
    ) -> Result<(), RetailError> {
        let capacity = self
            .capacity
            .get_mut(code)
            .ok_or_else(|| RetailError::NotRegistered(code.to_string()))?;

        if stock_limit.is_none() && exposure_limit.is_none() {
            return Err(RetailError::NoCapacityGiven(code.to_string()));
        }

        if let Some(limit) = stock_limit {
            capacity.stock_limit = limit;
        }
        if let Some(limit) = exposure_limit {
            capacity.exposure_limit = limit;
        }
        Ok(())
    }

    /// Add units to one of the pools, respecting its capacity limit.
    ///
    /// Quantity sign is the caller's concern: the cart layer rejects
    /// zero/negative sale quantities before they reach the inventory.
    pub fn add(&mut self, code: &ProductCode, quantity: u32, pool: Pool) -> Result<(), RetailError> {
        let capacity = *self
            .capacity
            .get(code)
            .ok_or_else(|| RetailError::NotRegistered(code.to_string()))?;

        let entry = match pool {
            Pool::Stock => self.stock.entry(code.clone()).or_insert(0),
            Pool::Exposure => self.exposure.entry(code.clone()).or_insert(0),
        };
        let limit = capacity.limit(pool);

        let requested = entry
            .checked_add(quantity)
            .ok_or(RetailError::Overflow)?;
        if requested > limit {
            return Err(RetailError::CapacityExceeded {
                code: code.to_string(),
                pool,
                requested,
                limit,
            });
        }

        *entry = requested;
        Ok(())
    }

    /// Transfer units from stock to exposure, all-or-nothing.
    ///
    /// Stock sufficiency is checked first, then exposure capacity; if
    /// either check fails, neither pool changes.
    pub fn move_to_exposure(
        &mut self,
        code: &ProductCode,
        quantity: u32,
    ) -> Result<(), RetailError> {
        let capacity = *self
            .capacity
            .get(code)
            .ok_or_else(|| RetailError::NotRegistered(code.to_string()))?;

        let in_stock = self.stock.get(code).copied().unwrap_or(0);
        if in_stock < quantity {
            return Err(RetailError::InsufficientStock {
                code: code.to_string(),
                requested: quantity,
                available: in_stock,
            });
        }

        let on_floor = self.exposure.get(code).copied().unwrap_or(0);
        let requested = on_floor.checked_add(quantity).ok_or(RetailError::Overflow)?;
        if requested > capacity.exposure_limit {
            return Err(RetailError::CapacityExceeded {
                code: code.to_string(),
                pool: Pool::Exposure,
                requested,
                limit: capacity.exposure_limit,
            });
        }

        self.stock.insert(code.clone(), in_stock - quantity);
        self.exposure.insert(code.clone(), requested);
        Ok(())
    }

    /// Deduct sold units from exposure, line by line, in caller order.
    ///
    /// Each line is checked and then immediately decremented before the
    /// next line is looked at; the first failing line aborts the call
    /// and lines processed before it STAY decremented. Batch-level
    /// rollback is deliberately not provided; the checkout workflow
    /// observes exactly the per-line progress that happened.
    pub fn sell<'a>(
        &mut self,
        lines: impl IntoIterator<Item = (&'a ProductCode, u32)>,
    ) -> Result<(), RetailError> {
        for (code, quantity) in lines {
            if !self.capacity.contains_key(code) {
                return Err(RetailError::NotRegistered(code.to_string()));
            }
            let on_floor = self.exposure.get(code).copied().unwrap_or(0);
            if on_floor < quantity {
                return Err(RetailError::InsufficientExposure {
                    code: code.to_string(),
                    requested: quantity,
                    available: on_floor,
                });
            }
            self.exposure.insert(code.clone(), on_floor - quantity);
        }
        Ok(())
    }

    /// Remove a product's entries entirely.
    ///
    /// Only legal once both pools are at zero, so no physical units are
    /// ever lost track of.
    pub fn remove(&mut self, code: &ProductCode) -> Result<(), RetailError> {
        if !self.capacity.contains_key(code) {
            return Err(RetailError::NotRegistered(code.to_string()));
        }
        let stock = self.stock.get(code).copied().unwrap_or(0);
        let exposure = self.exposure.get(code).copied().unwrap_or(0);
        if stock > 0 || exposure > 0 {
            return Err(RetailError::StillStocked(code.to_string()));
        }
        self.stock.remove(code);
        self.exposure.remove(code);
        self.capacity.remove(code);
        Ok(())
    }

    /// Current quantities and limits for a registered product.
    pub fn levels(&self, code: &ProductCode) -> Result<ProductLevels, RetailError> {
        let capacity = self
            .capacity
            .get(code)
            .ok_or_else(|| RetailError::NotRegistered(code.to_string()))?;
        Ok(ProductLevels {
            stock: self.stock.get(code).copied().unwrap_or(0),
            exposure: self.exposure.get(code).copied().unwrap_or(0),
            stock_limit: capacity.stock_limit,
            exposure_limit: capacity.exposure_limit,
        })
    }

    /// Product codes with zero quantity in the requested scope.
    ///
    /// `Both` unions products at zero in either pool.
    pub fn missing(&self, scope: MissingScope) -> Vec<ProductCode> {
        self.capacity
            .keys()
            .filter(|code| {
                let no_stock = self.stock.get(*code).copied().unwrap_or(0) == 0;
                let no_exposure = self.exposure.get(*code).copied().unwrap_or(0) == 0;
                match scope {
                    MissingScope::Stock => no_stock,
                    MissingScope::Exposure => no_exposure,
                    MissingScope::Both => no_stock || no_exposure,
                }
            })
            .cloned()
            .collect()
    }

    /// Pool occupancy percentages for a registered product.
    pub fn occupancy(&self, code: &ProductCode) -> Result<Occupancy, RetailError> {
        let levels = self.levels(code)?;
        Ok(Occupancy {
            stock_pct: percentage(levels.stock, levels.stock_limit),
            exposure_pct: percentage(levels.exposure, levels.exposure_limit),
        })
    }

    /// Iterate over registered product codes.
    pub fn products(&self) -> impl Iterator<Item = &ProductCode> {
        self.capacity.keys()
    }

    /// Number of registered products.
    pub fn len(&self) -> usize {
        self.capacity.len()
    }

    /// Check if no products are registered.
    pub fn is_empty(&self) -> bool {
        self.capacity.is_empty()
    }

    /// Total units across all products in one pool.
    pub fn pool_total(&self, pool: Pool) -> u64 {
        let map = match pool {
            Pool::Stock => &self.stock,
            Pool::Exposure => &self.exposure,
        };
        map.values().map(|q| *q as u64).sum()
    }
}

fn percentage(quantity: u32, limit: u32) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    let pct = quantity as f64 / limit as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inventory '{}'", self.code)?;
        writeln!(f, "Registered products: {}", self.len())?;
        writeln!(f, "Total in stock: {}", self.pool_total(Pool::Stock))?;
        write!(f, "Total in exposure: {}", self.pool_total(Pool::Exposure))?;

        let out_of_stock = self.missing(MissingScope::Stock);
        if !out_of_stock.is_empty() {
            let codes: Vec<&str> = out_of_stock.iter().map(|c| c.as_str()).collect();
            write!(f, "\nMissing in stock: {}", codes.join(", "))?;
        }
        let off_floor = self.missing(MissingScope::Exposure);
        if !off_floor.is_empty() {
            let codes: Vec<&str> = off_floor.iter().map(|c| c.as_str()).collect();
            write!(f, "\nMissing in exposure: {}", codes.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ProductCode {
        ProductCode::new(s)
    }

    fn inventory_with(product: &str, stock_limit: u32, exposure_limit: u32) -> Inventory {
        let mut inv = Inventory::new(InventoryCode::new("INV01"));
        inv.register(code(product), Capacity::new(stock_limit, exposure_limit))
            .unwrap();
        inv
    }

    #[test]
    fn test_register_starts_at_zero() {
        let inv = inventory_with("X", 100, 20);
        let levels = inv.levels(&code("X")).unwrap();
        assert_eq!(levels.stock, 0);
        assert_eq!(levels.exposure, 0);
        assert_eq!(levels.stock_limit, 100);
        assert_eq!(levels.exposure_limit, 20);
    }

    #[test]
    fn test_register_twice_rejected() {
        let mut inv = inventory_with("X", 100, 20);
        let result = inv.register(code("X"), Capacity::new(1, 1));
        assert!(matches!(result, Err(RetailError::AlreadyRegistered(_))));
    }

    #[test]
    fn test_add_up_to_capacity_then_reject() {
        // Scenario A: fill stock to the limit, then one more unit fails
        // with no mutation.
        let mut inv = inventory_with("X", 100, 20);
        inv.add(&code("X"), 100, Pool::Stock).unwrap();
        assert_eq!(inv.levels(&code("X")).unwrap().stock, 100);

        let result = inv.add(&code("X"), 1, Pool::Stock);
        assert!(matches!(
            result,
            Err(RetailError::CapacityExceeded {
                pool: Pool::Stock,
                requested: 101,
                limit: 100,
                ..
            })
        ));
        assert_eq!(inv.levels(&code("X")).unwrap().stock, 100);
    }

    #[test]
    fn test_add_unregistered_rejected() {
        let mut inv = inventory_with("X", 100, 20);
        let result = inv.add(&code("Y"), 1, Pool::Stock);
        assert!(matches!(result, Err(RetailError::NotRegistered(_))));
    }

    #[test]
    fn test_move_conserves_total() {
        // Scenario B: moving 20 to exposure keeps stock+exposure constant;
        // one unit more than the exposure limit leaves state untouched.
        let mut inv = inventory_with("X", 100, 20);
        inv.add(&code("X"), 100, Pool::Stock).unwrap();

        inv.move_to_exposure(&code("X"), 20).unwrap();
        let levels = inv.levels(&code("X")).unwrap();
        assert_eq!(levels.stock, 80);
        assert_eq!(levels.exposure, 20);
        assert_eq!(levels.stock + levels.exposure, 100);

        let result = inv.move_to_exposure(&code("X"), 1);
        assert!(matches!(
            result,
            Err(RetailError::CapacityExceeded {
                pool: Pool::Exposure,
                ..
            })
        ));
        let levels = inv.levels(&code("X")).unwrap();
        assert_eq!(levels.stock, 80);
        assert_eq!(levels.exposure, 20);
    }

    #[test]
    fn test_move_insufficient_stock_leaves_state() {
        let mut inv = inventory_with("X", 100, 20);
        inv.add(&code("X"), 5, Pool::Stock).unwrap();

        let result = inv.move_to_exposure(&code("X"), 6);
        assert!(matches!(
            result,
            Err(RetailError::InsufficientStock {
                requested: 6,
                available: 5,
                ..
            })
        ));
        let levels = inv.levels(&code("X")).unwrap();
        assert_eq!(levels.stock, 5);
        assert_eq!(levels.exposure, 0);
    }

    #[test]
    fn test_sell_decrements_exposure() {
        // Scenario C.
        let mut inv = inventory_with("X", 100, 20);
        inv.add(&code("X"), 100, Pool::Stock).unwrap();
        inv.move_to_exposure(&code("X"), 20).unwrap();

        let x = code("X");
        inv.sell([(&x, 5u32)]).unwrap();
        assert_eq!(inv.levels(&x).unwrap().exposure, 15);

        let result = inv.sell([(&x, 100u32)]);
        assert!(matches!(
            result,
            Err(RetailError::InsufficientExposure { .. })
        ));
        assert_eq!(inv.levels(&x).unwrap().exposure, 15);
    }

    #[test]
    fn test_sell_partial_batch_keeps_earlier_decrements() {
        // Lines before the failing one stay decremented; this per-line
        // progression is part of the contract.
        let mut inv = inventory_with("A", 50, 50);
        inv.register(code("B"), Capacity::new(50, 50)).unwrap();
        inv.add(&code("A"), 10, Pool::Exposure).unwrap();
        inv.add(&code("B"), 2, Pool::Exposure).unwrap();

        let a = code("A");
        let b = code("B");
        let result = inv.sell([(&a, 4u32), (&b, 3u32)]);
        assert!(matches!(
            result,
            Err(RetailError::InsufficientExposure { .. })
        ));
        assert_eq!(inv.levels(&a).unwrap().exposure, 6);
        assert_eq!(inv.levels(&b).unwrap().exposure, 2);
    }

    #[test]
    fn test_sell_unregistered_product() {
        let mut inv = inventory_with("A", 50, 50);
        let ghost = code("GHOST");
        let result = inv.sell([(&ghost, 1u32)]);
        assert!(matches!(result, Err(RetailError::NotRegistered(_))));
    }

    #[test]
    fn test_remove_only_at_zero() {
        // Scenario D.
        let mut inv = inventory_with("Y", 10, 10);
        inv.remove(&code("Y")).unwrap();
        assert!(!inv.is_registered(&code("Y")));

        inv.register(code("Y"), Capacity::new(10, 10)).unwrap();
        inv.add(&code("Y"), 1, Pool::Stock).unwrap();
        let result = inv.remove(&code("Y"));
        assert!(matches!(result, Err(RetailError::StillStocked(_))));
        assert!(inv.is_registered(&code("Y")));
        assert_eq!(inv.levels(&code("Y")).unwrap().stock, 1);
    }

    #[test]
    fn test_update_capacity_requires_a_field() {
        let mut inv = inventory_with("X", 100, 20);
        let result = inv.update_capacity(&code("X"), None, None);
        assert!(matches!(result, Err(RetailError::NoCapacityGiven(_))));
    }

    #[test]
    fn test_update_capacity_partial() {
        let mut inv = inventory_with("X", 100, 20);
        inv.update_capacity(&code("X"), Some(50), None).unwrap();
        let levels = inv.levels(&code("X")).unwrap();
        assert_eq!(levels.stock_limit, 50);
        assert_eq!(levels.exposure_limit, 20);
    }

    #[test]
    fn test_lowering_limit_does_not_touch_quantity() {
        // Scenario E: the capacity edit alone creates no inconsistency;
        // the ceiling check then blocks the over-limit add.
        let mut inv = inventory_with("Z", 50, 50);
        inv.update_capacity(&code("Z"), Some(5), None).unwrap();
        assert!(inv.check_consistency().is_consistent());

        let result = inv.add(&code("Z"), 6, Pool::Stock);
        assert!(matches!(result, Err(RetailError::CapacityExceeded { .. })));
        assert_eq!(inv.levels(&code("Z")).unwrap().stock, 0);
    }

    #[test]
    fn test_levels_idempotent() {
        let mut inv = inventory_with("X", 100, 20);
        inv.add(&code("X"), 7, Pool::Stock).unwrap();
        let first = inv.levels(&code("X")).unwrap();
        let second = inv.levels(&code("X")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_scopes() {
        let mut inv = inventory_with("A", 10, 10);
        inv.register(code("B"), Capacity::new(10, 10)).unwrap();
        inv.register(code("C"), Capacity::new(10, 10)).unwrap();

        // A: stocked and exposed, B: stocked only, C: nothing.
        inv.add(&code("A"), 5, Pool::Stock).unwrap();
        inv.add(&code("A"), 5, Pool::Exposure).unwrap();
        inv.add(&code("B"), 5, Pool::Stock).unwrap();

        assert_eq!(inv.missing(MissingScope::Stock), vec![code("C")]);
        assert_eq!(
            inv.missing(MissingScope::Exposure),
            vec![code("B"), code("C")]
        );
        // "Both" is a union: B is missing in exposure only and still listed.
        assert_eq!(inv.missing(MissingScope::Both), vec![code("B"), code("C")]);
    }

    #[test]
    fn test_occupancy_rounding_and_zero_limit() {
        let mut inv = inventory_with("X", 3, 0);
        inv.add(&code("X"), 1, Pool::Stock).unwrap();

        let occupancy = inv.occupancy(&code("X")).unwrap();
        assert_eq!(occupancy.stock_pct, 33.33);
        assert_eq!(occupancy.exposure_pct, 0.0);
    }

    #[test]
    fn test_pool_parse() {
        assert_eq!("Stock".parse::<Pool>().unwrap(), Pool::Stock);
        assert_eq!("exposure".parse::<Pool>().unwrap(), Pool::Exposure);
        assert!(matches!(
            "shelf".parse::<Pool>(),
            Err(RetailError::InvalidDestination(_))
        ));
    }

    #[test]
    fn test_missing_scope_parse() {
        assert_eq!("both".parse::<MissingScope>().unwrap(), MissingScope::Both);
        let err = "shelf".parse::<MissingScope>().unwrap_err();
        assert!(matches!(err, RetailError::Validation(_)));
        assert!(err.to_string().contains("'both'"));
    }

    #[test]
    fn test_display_summary() {
        let mut inv = inventory_with("A", 10, 10);
        inv.add(&code("A"), 4, Pool::Stock).unwrap();
        let text = format!("{}", inv);
        assert!(text.contains("Registered products: 1"));
        assert!(text.contains("Total in stock: 4"));
        assert!(text.contains("Missing in exposure: A"));
    }
}

//! Serializable image of an inventory's three mappings.

use super::inventory::{Capacity, Inventory};
use crate::catalog::Catalog;
use crate::error::RetailError;
use crate::ids::{InventoryCode, ProductCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat, code-keyed image of an [`Inventory`] for persistence.
///
/// Quantities and limits are carried exactly as they were; loading does
/// not clamp or repair anything, so an inconsistent image stays
/// inconsistent and is visible to the audit after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub code: InventoryCode,
    #[serde(default)]
    pub stock: BTreeMap<ProductCode, u32>,
    #[serde(default)]
    pub exposure: BTreeMap<ProductCode, u32>,
    #[serde(default)]
    pub capacity: BTreeMap<ProductCode, Capacity>,
}

impl Inventory {
    /// Capture the current state as a snapshot.
    pub fn to_snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            code: self.code().clone(),
            stock: self.stock.clone(),
            exposure: self.exposure.clone(),
            capacity: self.capacity.clone(),
        }
    }

    /// Rebuild an inventory from a snapshot, verbatim.
    ///
    /// Every product code mentioned anywhere in the snapshot must exist
    /// in the catalog; an unknown code fails the whole load.
    pub fn from_snapshot(
        snapshot: InventorySnapshot,
        catalog: &Catalog,
    ) -> Result<Self, RetailError> {
        let codes = snapshot
            .stock
            .keys()
            .chain(snapshot.exposure.keys())
            .chain(snapshot.capacity.keys());
        for code in codes {
            if !catalog.contains(code) {
                return Err(RetailError::UnresolvedProductReference {
                    inventory: snapshot.code.to_string(),
                    code: code.to_string(),
                });
            }
        }

        let mut inventory = Inventory::new(snapshot.code);
        inventory.stock = snapshot.stock;
        inventory.exposure = snapshot.exposure;
        inventory.capacity = snapshot.capacity;
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Pool;
    use crate::money::Money;
    use crate::catalog::Product;

    fn catalog_with(codes: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for (i, code) in codes.iter().enumerate() {
            // Valid EAN-13 payloads with computed check digits.
            let product = Product::new(
                ProductCode::new(*code),
                format!("Product {}", i),
                "Acme",
                "general",
                0.5,
                Money::new(1000, Default::default()),
            );
            catalog.register(product).unwrap();
        }
        catalog
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let mut catalog = Catalog::new();
        let code = ProductCode::new("4006381333931");
        catalog
            .register(Product::new(
                code.clone(),
                "Pen",
                "Stabilo",
                "stationery",
                0.02,
                Money::new(599, Default::default()),
            ))
            .unwrap();

        let mut inv = Inventory::new(InventoryCode::new("INV01"));
        inv.register(code.clone(), Capacity::new(100, 20)).unwrap();
        inv.add(&code, 30, Pool::Stock).unwrap();
        inv.move_to_exposure(&code, 10).unwrap();

        let snapshot = inv.to_snapshot();
        let restored = Inventory::from_snapshot(snapshot, &catalog).unwrap();
        assert_eq!(restored, inv);
    }

    #[test]
    fn test_unknown_code_fails_whole_load() {
        let catalog = Catalog::new();
        let snapshot = InventorySnapshot {
            code: InventoryCode::new("INV01"),
            stock: [(ProductCode::new("4006381333931"), 3u32)].into(),
            exposure: BTreeMap::new(),
            capacity: BTreeMap::new(),
        };

        let result = Inventory::from_snapshot(snapshot, &catalog);
        assert!(matches!(
            result,
            Err(RetailError::UnresolvedProductReference { .. })
        ));
    }

    #[test]
    fn test_inconsistent_snapshot_loads_verbatim() {
        let catalog = catalog_with(&["4006381333931"]);
        let code = ProductCode::new("4006381333931");
        let snapshot = InventorySnapshot {
            code: InventoryCode::new("INV01"),
            stock: [(code.clone(), 12u32)].into(),
            exposure: [(code.clone(), 0u32)].into(),
            capacity: [(code.clone(), Capacity::new(10, 5))].into(),
        };

        let restored = Inventory::from_snapshot(snapshot, &catalog).unwrap();
        assert_eq!(restored.levels(&code).unwrap().stock, 12);

        let report = restored.check_consistency();
        assert!(!report.is_consistent());
        assert_eq!(
            report.findings[0].problems,
            vec!["stock exceeds capacity (12 > 10)".to_string()]
        );
    }
}

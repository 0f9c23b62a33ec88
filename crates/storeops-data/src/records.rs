//! On-disk record shapes and file names.
//!
//! Domain types that serialize cleanly (products, employees, sales,
//! inventory snapshots) are persisted as-is; a store unit is flattened
//! into a [`UnitRecord`] that references its inventory, staff and sales
//! by code so each collection lives in exactly one file.

use serde::{Deserialize, Serialize};
use storeops_core::ids::{EmployeeId, InventoryCode, SaleId, UnitCode};
use storeops_core::unit::{Location, StoreUnit};

pub const PRODUCTS_FILE: &str = "products.json";
pub const EMPLOYEES_FILE: &str = "employees.json";
pub const INVENTORIES_FILE: &str = "inventories.json";
pub const SALES_FILE: &str = "sales.json";
pub const UNITS_FILE: &str = "units.json";

/// Flat, reference-based image of a [`StoreUnit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub code: UnitCode,
    pub name: String,
    pub location: Location,
    pub inventory: InventoryCode,
    #[serde(default)]
    pub staff: Vec<EmployeeId>,
    #[serde(default)]
    pub sales: Vec<SaleId>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UnitRecord {
    /// Flatten a unit into its record form.
    pub fn from_unit(unit: &StoreUnit) -> Self {
        Self {
            code: unit.code.clone(),
            name: unit.name.clone(),
            location: unit.location,
            inventory: unit.inventory.code().clone(),
            staff: unit.staff.clone(),
            sales: unit.sales.iter().map(|sale| sale.id.clone()).collect(),
            active: unit.active,
        }
    }
}

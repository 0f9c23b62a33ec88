//! Retail domain types and logic for StoreOps.
//!
//! This crate models a multi-unit retail operation:
//!
//! - **Catalog**: EAN-13 validated products, pricing, search
//! - **Inventory**: bounded two-pool quantities (stock and exposure),
//!   transfers, sales and a read-only consistency audit
//! - **Cart**: sale lines, pricing and finalization
//! - **Staff**: the employee directory with soft termination
//! - **Unit**: store units, their sale history and period reports
//!
//! # Example
//!
//! ```rust,ignore
//! use storeops_core::prelude::*;
//!
//! let mut inventory = Inventory::new(InventoryCode::new("INV01"));
//! inventory.register(ProductCode::new("4006381333931"), Capacity::new(100, 20))?;
//!
//! inventory.add(&code, 100, Pool::Stock)?;
//! inventory.move_to_exposure(&code, 20)?;
//! inventory.sell([(&code, 5)])?;
//!
//! assert!(inventory.check_consistency().is_consistent());
//! ```

pub mod dates;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod inventory;
pub mod staff;
pub mod unit;

pub use error::RetailError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::RetailError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{is_valid_ean13, Catalog, Product, ProductFilter, ProductUpdate};

    // Inventory
    pub use crate::inventory::{
        Capacity, ConsistencyReport, Inventory, InventorySnapshot, MissingScope, Occupancy, Pool,
        ProductLevels,
    };

    // Cart
    pub use crate::cart::{Cart, SaleLine};

    // Staff
    pub use crate::staff::{Employee, EmployeeUpdate, StaffDirectory};

    // Unit
    pub use crate::unit::{
        unit_report, Location, ReportPeriod, StoreUnit, UnitRegistry, UnitReport, UnitUpdate,
    };
}
